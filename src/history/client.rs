use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        message::{Message, Role},
        order::Order,
        session::SessionId,
    },
    infra::config::ServerConfig,
    usecases::contracts::{HistoryStore, OrdersSource, TransportError},
};

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("failed to initialize async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

/// Blocking REST client for the history/order backend.
///
/// Owns a current-thread runtime and drives the async HTTP client behind
/// the sync store traits, so the usecase layer never sees the transport.
#[derive(Debug)]
pub struct ApiClient {
    rt: tokio::runtime::Runtime,
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ApiClientError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ApiClientError::Runtime)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ApiClientError::Http)?;

        Ok(Self {
            rt,
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransportError> {
        self.rt.block_on(async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(unreachable_error)?;
            decode(response).await
        })
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        self.rt.block_on(async {
            let response = self
                .http
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(unreachable_error)?;
            decode(response).await
        })
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|error| TransportError::InvalidPayload {
            reason: error.to_string(),
        })
}

fn unreachable_error(error: reqwest::Error) -> TransportError {
    TransportError::Unreachable {
        reason: error.to_string(),
    }
}

impl HistoryStore for ApiClient {
    fn append(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
    ) -> Result<Message, TransportError> {
        let request = super::wire::AppendMessageRequest {
            session_id: session_id.as_str(),
            role: role.as_str(),
            content,
        };
        let record: super::wire::MessageRecord =
            self.post_json(&format!("{}/history/", self.base_url), &request)?;

        record.into_message()
    }

    fn list(&self, session_id: &SessionId) -> Result<Vec<Message>, TransportError> {
        let records: Vec<super::wire::MessageRecord> = self.get_json(&format!(
            "{}/history/?session_id={}",
            self.base_url,
            session_id.as_str()
        ))?;

        records
            .into_iter()
            .map(super::wire::MessageRecord::into_message)
            .collect()
    }
}

impl OrdersSource for ApiClient {
    fn list_orders(&self) -> Result<Vec<Order>, TransportError> {
        let records: Vec<super::wire::OrderRecord> =
            self.get_json(&format!("{}/chatbot/orders", self.base_url))?;

        Ok(records
            .into_iter()
            .map(super::wire::OrderRecord::into_order)
            .collect())
    }
}

//! Wire records exchanged with the history/order backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        message::{Message, Role},
        order::{LineItem, Order, OrderStatus},
        session::SessionId,
    },
    usecases::contracts::TransportError,
};

#[derive(Debug, Serialize)]
pub(super) struct AppendMessageRequest<'a> {
    pub session_id: &'a str,
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageRecord {
    pub id: i64,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageRecord {
    pub fn into_message(self) -> Result<Message, TransportError> {
        let role = Role::parse(&self.role).ok_or_else(|| TransportError::InvalidPayload {
            reason: format!("unknown role {:?}", self.role),
        })?;

        Ok(Message {
            id: self.id,
            session_id: SessionId::new(self.session_id),
            role,
            content: self.content,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct LineItemRecord {
    pub item_name: String,
    #[serde(default)]
    pub quantity: u32,
}

/// Extracted orders come from an LLM pipeline; everything but the id may be
/// missing and defaults to empty.
#[derive(Debug, Deserialize)]
pub(super) struct OrderRecord {
    pub id: i64,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub delivery_time: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub line_items: Vec<LineItemRecord>,
    #[serde(default)]
    pub total_price: i64,
}

impl OrderRecord {
    pub fn into_order(self) -> Order {
        let status = self
            .status
            .as_deref()
            .and_then(OrderStatus::parse)
            .unwrap_or_default();

        Order {
            id: self.id,
            customer_name: self.customer_name,
            phone: self.phone,
            delivery_time: self.delivery_time,
            address: self.address,
            status,
            notes: self.notes,
            line_items: self
                .line_items
                .into_iter()
                .map(|item| LineItem {
                    item_name: item.item_name,
                    quantity: item.quantity,
                })
                .collect(),
            total_price: self.total_price,
        }
    }
}

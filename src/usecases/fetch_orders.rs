use crate::domain::order::Order;

use super::contracts::{OrdersSource, TransportError};

/// Domain-level errors for the order listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOrdersError {
    TemporarilyUnavailable { reason: String },
    DataContractViolation { reason: String },
}

/// Fetches the extracted orders in backend order.
pub fn fetch_orders(source: &dyn OrdersSource) -> Result<Vec<Order>, FetchOrdersError> {
    source.list_orders().map_err(map_source_error)
}

fn map_source_error(error: TransportError) -> FetchOrdersError {
    match error {
        TransportError::Unreachable { reason } => {
            FetchOrdersError::TemporarilyUnavailable { reason }
        }
        TransportError::Status { status } => FetchOrdersError::TemporarilyUnavailable {
            reason: format!("status {status}"),
        },
        TransportError::InvalidPayload { reason } => {
            FetchOrdersError::DataContractViolation { reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::order::{LineItem, OrderStatus};

    use super::*;

    struct StubSource {
        result: Mutex<Option<Result<Vec<Order>, TransportError>>>,
    }

    impl StubSource {
        fn with_result(result: Result<Vec<Order>, TransportError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
            }
        }
    }

    impl OrdersSource for StubSource {
        fn list_orders(&self) -> Result<Vec<Order>, TransportError> {
            self.result
                .lock()
                .expect("result lock")
                .take()
                .expect("stub source called more than once")
        }
    }

    fn sample_order() -> Order {
        Order {
            id: 1,
            customer_name: "Trần Thị B".to_owned(),
            phone: "0987654321".to_owned(),
            delivery_time: "09:00".to_owned(),
            address: "45 Lê Lợi".to_owned(),
            status: OrderStatus::Confirmed,
            notes: String::new(),
            line_items: vec![LineItem {
                item_name: "bánh kem".to_owned(),
                quantity: 1,
            }],
            total_price: 300_000,
        }
    }

    #[test]
    fn keeps_source_payload_without_mutation() {
        let orders = vec![sample_order()];
        let source = StubSource::with_result(Ok(orders.clone()));

        let output = fetch_orders(&source).expect("fetch should succeed");

        assert_eq!(output, orders);
    }

    #[test]
    fn maps_unreachable_to_temporarily_unavailable() {
        let source = StubSource::with_result(Err(TransportError::Unreachable {
            reason: "connection refused".to_owned(),
        }));

        let err = fetch_orders(&source).expect_err("must fail");

        assert_eq!(
            err,
            FetchOrdersError::TemporarilyUnavailable {
                reason: "connection refused".to_owned()
            }
        );
    }

    #[test]
    fn maps_status_failure_with_code_in_reason() {
        let source = StubSource::with_result(Err(TransportError::Status { status: 503 }));

        let err = fetch_orders(&source).expect_err("must fail");

        assert_eq!(
            err,
            FetchOrdersError::TemporarilyUnavailable {
                reason: "status 503".to_owned()
            }
        );
    }

    #[test]
    fn maps_invalid_payload_to_data_contract_violation() {
        let source = StubSource::with_result(Err(TransportError::InvalidPayload {
            reason: "missing field".to_owned(),
        }));

        let err = fetch_orders(&source).expect_err("must fail");

        assert_eq!(
            err,
            FetchOrdersError::DataContractViolation {
                reason: "missing field".to_owned()
            }
        );
    }
}

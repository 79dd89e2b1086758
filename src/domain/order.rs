//! Order read model.
//!
//! Orders are produced by the order extraction backend; this client only
//! reads and displays them.

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
}

impl OrderStatus {
    /// Parses the wire spelling. Returns None for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// Returns the customer-facing status label.
    pub fn display_label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Chờ xác nhận",
            OrderStatus::Confirmed => "Đã xác nhận",
            OrderStatus::Completed => "Hoàn thành",
        }
    }
}

/// One product line in an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub item_name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub delivery_time: String,
    pub address: String,
    pub status: OrderStatus,
    pub notes: String,
    pub line_items: Vec<LineItem>,
    pub total_price: i64,
}

impl Order {
    /// Comma-joined product names, e.g. "bánh kem, bánh mì".
    pub fn items_summary(&self) -> String {
        self.line_items
            .iter()
            .map(|item| item.item_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn total_quantity(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

/// Formats an amount in Vietnamese đồng with thousands separators.
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} VNĐ")
}

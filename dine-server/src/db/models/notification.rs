use serde::{Deserialize, Serialize};

/// Kind of event a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum NotificationType {
    OrderPlaced,
    OrderReady,
    BillPending,
    PaymentReceived,
    TableAlert,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::OrderPlaced => "order_placed",
            NotificationType::OrderReady => "order_ready",
            NotificationType::BillPending => "bill_pending",
            NotificationType::PaymentReceived => "payment_received",
            NotificationType::TableAlert => "table_alert",
        }
    }
}

/// In-app notification addressed to one staff member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub table_id: Option<i64>,
    pub order_id: Option<i64>,
    pub bill_id: Option<i64>,
    pub is_read: bool,
    pub created_at: i64,
    pub read_at: Option<i64>,
}

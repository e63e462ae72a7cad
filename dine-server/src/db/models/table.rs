use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{BillStatus, OrderStatus};

/// Lifecycle state of a dining table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
    BillRequested,
    Closed,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::BillRequested => "bill_requested",
            TableStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: i64,
    pub table_number: i64,
    pub seating_capacity: i64,
    pub status: TableStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating a table
#[derive(Debug, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(range(min = 1, message = "Table number must be positive"))]
    pub table_number: i64,

    #[validate(range(min = 1, max = 100, message = "Seating capacity must be 1-100"))]
    pub seating_capacity: i64,
}

/// Payload for updating a table's static attributes
///
/// Status is never set directly; it only moves through lifecycle actions.
#[derive(Debug, Deserialize, Validate)]
pub struct DiningTableUpdate {
    #[validate(range(min = 1, message = "Table number must be positive"))]
    pub table_number: Option<i64>,

    #[validate(range(min = 1, max = 100, message = "Seating capacity must be 1-100"))]
    pub seating_capacity: Option<i64>,
}

/// One row of the floor dashboard: table plus its active order and bill
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TableDashboardEntry {
    pub id: i64,
    pub table_number: i64,
    pub seating_capacity: i64,
    pub status: TableStatus,
    pub order_id: Option<i64>,
    pub order_status: Option<OrderStatus>,
    pub item_count: i64,
    pub bill_id: Option<i64>,
    pub bill_status: Option<BillStatus>,
}

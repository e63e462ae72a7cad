use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::money::Money;

/// Lifecycle state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BillStatus {
    NotGenerated,
    Pending,
    Paid,
    Cancelled,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::NotGenerated => "not_generated",
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bill record
///
/// `order_id` stays NULL until figures are generated from a served order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bill {
    pub id: i64,
    pub table_id: i64,
    pub order_id: Option<i64>,
    #[sqlx(try_from = "String")]
    pub subtotal: Money,
    #[sqlx(try_from = "String")]
    pub tax_percentage: Money,
    #[sqlx(try_from = "String")]
    pub tax_amount: Money,
    #[sqlx(try_from = "String")]
    pub total_amount: Money,
    pub status: BillStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub paid_at: Option<i64>,
}

/// Payload for opening a bill shell on a table
#[derive(Debug, Deserialize, Validate)]
pub struct BillCreate {
    pub table_id: i64,

    /// Tax rate in percent; defaults to 5.00 when absent
    pub tax_percentage: Option<Money>,
}

/// Payload for generating figures from a served order
#[derive(Debug, Deserialize, Validate)]
pub struct BillGenerate {
    pub order_id: i64,
}

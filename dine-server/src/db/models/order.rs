use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::money::Money;

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    InKitchen,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::InKitchen => "in_kitchen",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub status: OrderStatus,
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line, joined with the menu item name for display
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: String,
    pub quantity: i64,
    #[sqlx(try_from = "String")]
    pub unit_price: Money,
    pub special_notes: String,
    pub created_at: i64,
}

/// Order with its lines
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Payload for opening an order on a table
#[derive(Debug, Deserialize, Validate)]
pub struct OrderCreate {
    pub table_id: i64,

    #[serde(default)]
    #[validate(length(max = 500, message = "Notes too long"))]
    pub notes: String,
}

/// Payload for adding a line to an order
#[derive(Debug, Deserialize, Validate)]
pub struct OrderAddItem {
    pub menu_item_id: i64,

    #[validate(range(min = 1, max = 999, message = "Quantity must be 1-999"))]
    pub quantity: i64,

    #[serde(default)]
    #[validate(length(max = 500, message = "Special notes too long"))]
    pub special_notes: String,
}

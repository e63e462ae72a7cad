use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::money::Money;

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MenuCategory {
    Starter,
    Main,
    Drink,
    Dessert,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Starter => "starter",
            MenuCategory::Main => "main",
            MenuCategory::Drink => "drink",
            MenuCategory::Dessert => "dessert",
        }
    }
}

/// Menu item record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: MenuCategory,
    #[sqlx(try_from = "String")]
    pub price: Money,
    pub description: String,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating a menu item
#[derive(Debug, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub category: MenuCategory,

    /// Must be strictly positive; checked in the repository since validator
    /// has no range rule for decimals.
    pub price: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Payload for updating a menu item; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
}

fn default_true() -> bool {
    true
}

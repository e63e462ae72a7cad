//! Menu Item Repository

use super::{RepoError, RepoResult};
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::money::Money;
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

fn validate_price(price: Money) -> RepoResult<()> {
    if !price.is_positive() {
        return Err(RepoError::Validation(format!(
            "Price must be positive, got {price}"
        )));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, description, is_available, created_at, updated_at FROM menu_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<MenuItem> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

pub async fn find_all(
    pool: &SqlitePool,
    category: Option<MenuCategory>,
    is_available: Option<bool>,
) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, description, is_available, created_at, updated_at FROM menu_item WHERE (?1 IS NULL OR category = ?1) AND (?2 IS NULL OR is_available = ?2) ORDER BY category, name",
    )
    .bind(category)
    .bind(is_available)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    validate_price(data.price)?;

    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_item (name, category, price, description, is_available, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.category)
    .bind(data.price.as_db())
    .bind(&data.description)
    .bind(data.is_available)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(price) = data.price {
        validate_price(price)?;
    }

    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), category = COALESCE(?2, category), price = COALESCE(?3, price), description = COALESCE(?4, description), is_available = COALESCE(?5, is_available), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name)
    .bind(data.category)
    .bind(data.price.map(|p| p.as_db()))
    .bind(data.description)
    .bind(data.is_available)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    get(pool, id).await
}

/// Delete a menu item; refused while any order line references it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let referenced = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM order_item WHERE menu_item_id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    if referenced > 0 {
        return Err(RepoError::Conflict(
            "Menu item is referenced by existing orders; mark it unavailable instead".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(())
}

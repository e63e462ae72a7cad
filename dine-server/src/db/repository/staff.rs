//! Staff Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Staff, StaffCreate, StaffRole};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const STAFF_COLS: &str = "id, username, display_name, role, password_hash, is_active, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!("SELECT {STAFF_COLS} FROM staff WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(staff)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!(
        "SELECT {STAFF_COLS} FROM staff WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(staff)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!(
        "SELECT {STAFF_COLS} FROM staff ORDER BY username"
    ))
    .fetch_all(pool)
    .await?;
    Ok(staff)
}

/// Active staff holding one of the given roles; notification fan-out targets
pub async fn find_active_by_roles(pool: &SqlitePool, roles: &[StaffRole]) -> RepoResult<Vec<Staff>> {
    // Role set is at most 4 entries, build placeholders inline
    let placeholders = vec!["?"; roles.len()].join(", ");
    let sql = format!(
        "SELECT {STAFF_COLS} FROM staff WHERE is_active = 1 AND role IN ({placeholders}) ORDER BY id"
    );

    let mut query = sqlx::query_as::<_, Staff>(&sql);
    for role in roles {
        query = query.bind(*role);
    }
    let staff = query.fetch_all(pool).await?;
    Ok(staff)
}

pub async fn create(pool: &SqlitePool, data: StaffCreate) -> RepoResult<Staff> {
    let password_hash = Staff::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;
    let display_name = data.display_name.unwrap_or_else(|| data.username.clone());

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO staff (username, display_name, role, password_hash, is_active, created_at) VALUES (?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(&data.username)
    .bind(&display_name)
    .bind(data.role)
    .bind(&password_hash)
    .bind(now_millis())
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Username '{}' already exists", data.username))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff".into()))
}

//! Revoked Token Repository
//!
//! Logout stores a SHA-256 hash of the JWT until its natural expiry; the auth
//! middleware rejects any token whose hash is present. Expired rows are
//! cleared by the periodic sweep.

use super::RepoResult;
use crate::utils::time::now_millis;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

/// Hex SHA-256 of the raw token; raw tokens are never persisted
pub fn token_hash(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub async fn revoke(pool: &SqlitePool, token: &str, expires_at_millis: i64) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO revoked_token (token_hash, expires_at, revoked_at) VALUES (?, ?, ?) ON CONFLICT(token_hash) DO NOTHING",
    )
    .bind(token_hash(token))
    .bind(expires_at_millis)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn is_revoked(pool: &SqlitePool, token: &str) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM revoked_token WHERE token_hash = ?",
    )
    .bind(token_hash(token))
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Drop revocation rows for tokens that have expired on their own
pub async fn delete_expired(pool: &SqlitePool) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM revoked_token WHERE expires_at < ?")
        .bind(now_millis())
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

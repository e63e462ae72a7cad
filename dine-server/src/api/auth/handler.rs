//! Authentication Handlers
//!
//! Login, logout and current-user lookup.

use std::time::Duration;

use axum::{Extension, Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppError;
use crate::auth::{CurrentUser, JwtService, permissions};
use crate::core::ServerState;
use crate::db::repository::{staff, token};
use crate::utils::AppResult;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/login
///
/// Authenticates credentials and returns a JWT plus the user profile.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate()?;

    let account = staff::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay before inspecting the result, so found and not-found
    // take the same time
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) => a,
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::validation("Invalid username or password"));
        }
    };

    if !account.is_active {
        return Err(AppError::forbidden("Account has been disabled"));
    }

    let password_valid = account
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::validation("Invalid username or password"));
    }

    let permissions = permissions::for_role(account.role);
    let token = state
        .jwt_service
        .generate_token(account.id, &account.username, account.role.as_str(), &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = account.id,
        username = %account.username,
        role = %account.role,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            role: account.role.as_str().to_string(),
            permissions,
            is_active: account.is_active,
            created_at: account.created_at,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let account = staff::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", user.id)))?;

    Ok(Json(UserInfo {
        id: account.id,
        username: account.username,
        display_name: account.display_name,
        role: account.role.as_str().to_string(),
        permissions: user.permissions,
        is_active: account.is_active,
        created_at: account.created_at,
    }))
}

/// POST /api/auth/logout
///
/// Revokes the presented token until its natural expiry.
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<serde_json::Value>> {
    let raw_token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .ok_or(AppError::InvalidToken)?;

    let claims = state
        .jwt_service
        .validate_token(raw_token)
        .map_err(|_| AppError::InvalidToken)?;

    token::revoke(&state.pool, raw_token, claims.exp * 1000).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    Ok(Json(serde_json::json!({ "detail": "Logged out" })))
}

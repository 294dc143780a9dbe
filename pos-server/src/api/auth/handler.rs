//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, User};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppResult, ErrorCode};

/// Fixed delay applied to every login attempt, so timing does not reveal
/// whether a username exists
const AUTH_FIXED_DELAY_MS: u64 = 200;

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.get_db());
    let username = req.username.trim().to_string();
    let record = repo.find_by_username(&username).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let record = match record {
        Some(record) => {
            let valid = record
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !valid {
                security_log!("WARN", "login_failed", username = username.clone(), reason = "invalid_password");
                return Err(AppError::invalid_credentials());
            }
            record
        }
        None => {
            security_log!("WARN", "login_failed", username = username.clone(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = record.id_string();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &record.username, record.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %record.username,
        role = %record.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: User::from(record),
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let found = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(found))
}

//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::user::MIN_PASSWORD_LEN;
use shared::models::{User, UserCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, UserRepository, parse_record_id};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepository::new(state.get_db()).find_all().await?;
    Ok(Json(users))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort)
            .with_detail("min_length", MIN_PASSWORD_LEN as u64));
    }
    payload.validate().map_err(AppError::validation)?;

    let user = UserRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::UsernameExists, msg),
            other => other.into(),
        })?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        role = %user.role.as_str(),
        created_by = %admin.username,
        "User created"
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let target = parse_record_id("pos_user", &id)?;
    if target.to_string() == admin.id {
        return Err(AppError::new(ErrorCode::UserCannotDeleteSelf));
    }

    UserRepository::new(state.get_db())
        .delete(&id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("user_id", id.clone())
            }
            other => other.into(),
        })?;

    // A deleted account has no session left; drop its cart with it
    state.carts.discard(&target.to_string());

    tracing::info!(user_id = %id, deleted_by = %admin.username, "User deleted");
    Ok(Json(ApiResponse::message("User deleted")))
}

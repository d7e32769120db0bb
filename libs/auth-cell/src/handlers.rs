use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AuthError, LoginRequest, RegisterRequest};
use crate::services::account::AccountService;
use crate::store::UserStore;

#[derive(Clone)]
pub struct AuthState {
    pub store: Arc<dyn UserStore>,
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AuthState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let account_service = AccountService::new(state.store.clone());

    account_service
        .register(request)
        .await
        .map_err(map_auth_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let account_service = AccountService::new(state.store.clone());

    let user = account_service.login(request).await.map_err(map_auth_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": {
            "username": user.username,
            "email": user.email
        }
    })))
}

fn map_auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::EmailTaken => AppError::Conflict("User with this email already exists".to_string()),
        AuthError::UserNotFound => AppError::NotFound("User not found".to_string()),
        AuthError::InvalidCredentials => AppError::Auth("Incorrect password".to_string()),
        AuthError::ValidationError(msg) => AppError::BadRequest(msg),
        AuthError::HashingError(msg) => AppError::Internal(msg),
        AuthError::StorageError(msg) => AppError::Storage(msg),
    }
}

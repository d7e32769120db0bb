// libs/auth-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    /// Argon2 PHC string; never serialized onto the wire.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("User with this email already exists")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hashing error: {0}")]
    HashingError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

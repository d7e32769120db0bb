use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use tracing::info;

use crate::models::{AuthError, LoginRequest, RegisterRequest, User};
use crate::services::password::PasswordService;
use crate::store::{StoreError, UserStore};

const MIN_PASSWORD_LENGTH: usize = 8;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

pub struct AccountService {
    store: Arc<dyn UserStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new account. New accounts always get the `user` role;
    /// there is no self-service privilege escalation.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        if !email_pattern().is_match(&request.email) {
            return Err(AuthError::ValidationError(format!(
                "Invalid email: {}",
                request.email
            )));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = PasswordService::hash_password(&request.password)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        let user = User {
            username: request.username,
            email: request.email,
            password_hash,
            role: "user".to_string(),
            created_at: Utc::now(),
        };

        match self.store.insert(user.clone()).await {
            Ok(()) => {
                info!("User {} registered", user.email);
                Ok(user)
            }
            Err(StoreError::DuplicateEmail) => Err(AuthError::EmailTaken),
            Err(e) => Err(AuthError::StorageError(e.to_string())),
        }
    }

    /// Verify credentials and return the matching account.
    pub async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        let user = self
            .store
            .find_by_email(&request.email)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        let verified = PasswordService::verify_password(&request.password, &user.password_hash)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} logged in", user.email);
        Ok(user)
    }
}

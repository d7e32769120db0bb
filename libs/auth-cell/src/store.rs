// libs/auth-cell/src/store.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::User;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    DuplicateEmail,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for user accounts, keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; the email must not already be registered. The
    /// uniqueness check and the insert are atomic.
    async fn insert(&self, user: User) -> Result<(), StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

pub struct MemoryUserStore {
    inner: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.insert(user.email.clone(), user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.get(email).cloned())
    }
}

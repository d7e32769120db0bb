pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::{AuthError, User};
pub use store::{MemoryUserStore, UserStore};

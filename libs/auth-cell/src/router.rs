use axum::{routing::post, Router};

use crate::handlers::{self, AuthState};

pub fn auth_routes(state: AuthState) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .with_state(state)
}

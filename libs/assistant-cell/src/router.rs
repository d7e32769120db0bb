use axum::{routing::post, Router};

use crate::handlers::{self, AssistantState};

pub fn assistant_routes(state: AssistantState) -> Router {
    Router::new()
        .route("/", post(handlers::chat))
        .with_state(state)
}

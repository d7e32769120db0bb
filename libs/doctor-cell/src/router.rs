use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{self, DoctorState};

pub fn doctor_routes(state: DoctorState) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/", post(handlers::create_doctor))
        .route("/{doctor_id}", delete(handlers::delete_doctor))
        .with_state(state)
}

// libs/appointment-cell/src/router.rs
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{self, AppointmentState};

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/", get(handlers::list_appointments))
        .route("/availability", get(handlers::get_availability))
        .route("/conflicts/check", get(handlers::check_conflict))
        .route("/patients/{patient_email}", get(handlers::get_patient_appointments))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/{appointment_id}", delete(handlers::cancel_appointment))
        .with_state(state)
}

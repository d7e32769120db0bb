use axum::{routing::get, Router};

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use assistant_cell::handlers::AssistantState;
use assistant_cell::router::assistant_routes;
use auth_cell::handlers::AuthState;
use auth_cell::router::auth_routes;
use doctor_cell::handlers::DoctorState;
use doctor_cell::router::doctor_routes;

pub fn create_router(
    auth_state: AuthState,
    doctor_state: DoctorState,
    appointment_state: AppointmentState,
    assistant_state: AssistantState,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Consultancy appointment API is running!" }))
        .nest("/auth", auth_routes(auth_state))
        .nest("/doctors", doctor_routes(doctor_state))
        .nest("/appointments", appointment_routes(appointment_state))
        .nest("/chat", assistant_routes(assistant_state))
}

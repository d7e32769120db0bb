use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::handlers::AppointmentState;
use appointment_cell::services::slots::SlotGrid;
use appointment_cell::store::MemoryAppointmentStore;
use assistant_cell::handlers::AssistantState;
use auth_cell::handlers::AuthState;
use auth_cell::store::MemoryUserStore;
use doctor_cell::handlers::DoctorState;
use doctor_cell::store::MemoryDoctorStore;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Consultancy API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());
    let grid = SlotGrid::from_config(&config).context("invalid schedule configuration")?;

    // The stores are the single owners of all mutable state; every cell
    // receives them as injected trait objects.
    let appointment_store = Arc::new(MemoryAppointmentStore::new());
    let doctor_store = Arc::new(MemoryDoctorStore::new());
    let user_store = Arc::new(MemoryUserStore::new());

    let auth_state = AuthState {
        store: user_store,
    };
    let doctor_state = DoctorState {
        store: doctor_store.clone(),
    };
    let appointment_state = AppointmentState {
        store: appointment_store.clone(),
        directory: doctor_store.clone(),
        grid,
    };
    let assistant_state = AssistantState {
        config: config.clone(),
        store: appointment_store,
        directory: doctor_store,
        grid,
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(auth_state, doctor_state, appointment_state, assistant_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

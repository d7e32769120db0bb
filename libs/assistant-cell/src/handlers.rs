use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use appointment_cell::services::slots::SlotGrid;
use appointment_cell::store::AppointmentStore;
use doctor_cell::store::DoctorStore;
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AssistantError, ChatRequest};
use crate::services::assistant::AssistantService;

#[derive(Clone)]
pub struct AssistantState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn AppointmentStore>,
    pub directory: Arc<dyn DoctorStore>,
    pub grid: SlotGrid,
}

#[axum::debug_handler]
pub async fn chat(
    State(state): State<AssistantState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let assistant = AssistantService::new(
        state.config.clone(),
        state.store.clone(),
        state.directory.clone(),
        state.grid,
    );

    let response = assistant.chat(request).await.map_err(map_assistant_error)?;

    Ok(Json(json!({
        "success": true,
        "response": response
    })))
}

fn map_assistant_error(e: AssistantError) -> AppError {
    match e {
        AssistantError::NotConfigured => {
            AppError::ExternalService("Assistant is not configured".to_string())
        }
        AssistantError::ValidationError(msg) => AppError::BadRequest(msg),
        AssistantError::InferenceError(msg) => AppError::ExternalService(msg),
        AssistantError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AssistantError::StorageError(msg) => AppError::Storage(msg),
    }
}

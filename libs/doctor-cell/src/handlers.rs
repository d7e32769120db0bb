use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError, DoctorId};
use crate::services::directory::DirectoryService;
use crate::store::DoctorStore;

/// Shared state for the doctor directory routes.
#[derive(Clone)]
pub struct DoctorState {
    pub store: Arc<dyn DoctorStore>,
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<DoctorState>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let directory = DirectoryService::new(state.store.clone());

    let doctor = directory
        .create_doctor(request)
        .await
        .map_err(map_doctor_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": doctor.id,
            "doctor": doctor,
            "message": "Doctor added successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<DoctorState>,
) -> Result<Json<Value>, AppError> {
    let directory = DirectoryService::new(state.store.clone());

    let doctors = directory.list_doctors().await.map_err(map_doctor_error)?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_id: DoctorId = doctor_id
        .parse()
        .map_err(|e: crate::models::DoctorIdParseError| AppError::BadRequest(e.to_string()))?;

    let directory = DirectoryService::new(state.store.clone());

    directory
        .delete_doctor(doctor_id)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor deleted successfully"
    })))
}

fn map_doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::ValidationError(msg) => AppError::BadRequest(msg),
        DoctorError::StorageError(msg) => AppError::Storage(msg),
    }
}

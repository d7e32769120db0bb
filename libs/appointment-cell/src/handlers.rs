// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use doctor_cell::models::DoctorId;
use doctor_cell::store::DoctorStore;
use shared_models::error::AppError;

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::availability::AvailabilityService;
use crate::services::booking::BookingService;
use crate::services::conflict::ConflictService;
use crate::services::slots::SlotGrid;
use crate::store::AppointmentStore;

/// Shared state for the appointment routes. The stores are injected trait
/// objects so tests can run the full router against in-memory doubles.
#[derive(Clone)]
pub struct AppointmentState {
    pub store: Arc<dyn AppointmentStore>,
    pub directory: Arc<dyn DoctorStore>,
    pub grid: SlotGrid,
}

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ConflictCheckQuery {
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DoctorAppointmentsQuery {
    pub date: Option<NaiveDate>,
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking_service =
        BookingService::new(state.store.clone(), state.directory.clone(), state.grid);

    let appointment = booking_service
        .book_appointment(request)
        .await
        .map_err(map_appointment_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": appointment.id,
            "appointment": appointment,
            "message": "Appointment booked successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<AppointmentState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let availability_service =
        AvailabilityService::new(state.store.clone(), state.directory.clone(), state.grid);

    let slots = availability_service
        .free_slots(query.doctor_id, query.date)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "doctor_id": query.doctor_id,
        "date": query.date,
        "slots": slots
    })))
}

#[axum::debug_handler]
pub async fn check_conflict(
    State(state): State<AppointmentState>,
    Query(query): Query<ConflictCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let conflict_service = ConflictService::new(state.store.clone());

    let duration_minutes = query.duration_minutes.unwrap_or(state.grid.slot_minutes());
    let available = conflict_service
        .is_available(
            query.doctor_id,
            query.date,
            query.time,
            chrono::Duration::minutes(duration_minutes as i64),
        )
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "doctor_id": query.doctor_id,
        "date": query.date,
        "time": query.time,
        "duration_minutes": duration_minutes,
        "available": available
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service =
        BookingService::new(state.store.clone(), state.directory.clone(), state.grid);

    booking_service
        .cancel_appointment(appointment_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment cancelled successfully"
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppointmentState>,
) -> Result<Json<Value>, AppError> {
    let booking_service =
        BookingService::new(state.store.clone(), state.directory.clone(), state.grid);

    let appointments = booking_service
        .list_appointments()
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<AppointmentState>,
    Path(patient_email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service =
        BookingService::new(state.store.clone(), state.directory.clone(), state.grid);

    let appointments = booking_service
        .get_patient_appointments(&patient_email)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<AppointmentState>,
    Path(doctor_id): Path<String>,
    Query(query): Query<DoctorAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_id: DoctorId = doctor_id
        .parse()
        .map_err(|e: doctor_cell::models::DoctorIdParseError| AppError::BadRequest(e.to_string()))?;

    let booking_service =
        BookingService::new(state.store.clone(), state.directory.clone(), state.grid);

    let appointments = booking_service
        .get_doctor_appointments(doctor_id, query.date)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

fn map_appointment_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AppointmentError::ConflictDetected => {
            AppError::Conflict("Appointment slot conflicts with existing booking".to_string())
        }
        AppointmentError::InvalidTime(msg) => AppError::BadRequest(msg),
        AppointmentError::ValidationError(msg) => AppError::BadRequest(msg),
        AppointmentError::StorageError(msg) => AppError::Storage(msg),
    }
}

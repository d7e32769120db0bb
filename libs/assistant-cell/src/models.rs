// libs/assistant-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use doctor_cell::models::DoctorId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    /// Optional structured hints from the client UI. When both are present
    /// the assistant fetches the doctor's free slots and hands them to the
    /// model as context; the text itself is never parsed for dates or
    /// intents.
    #[serde(default)]
    pub doctor_id: Option<DoctorId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    #[error("Assistant is not configured")]
    NotConfigured,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Inference service error: {0}")]
    InferenceError(String),

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Storage error: {0}")]
    StorageError(String),
}

// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doctor_cell::models::DoctorId;

// ==============================================================================
// TIME INTERVALS
// ==============================================================================

/// Half-open time interval `[start, end)` within a single calendar day.
///
/// All conflict decisions in the scheduling core go through
/// [`TimeInterval::overlaps`], so adjacency is handled in exactly one place:
/// an appointment ending at 10:00 never conflicts with one starting at 10:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    /// Build the interval `[start, start + duration)`.
    ///
    /// Fails if the duration is not positive or the interval would cross
    /// midnight; appointments are day-scoped.
    pub fn starting_at(start: NaiveTime, duration: Duration) -> Result<Self, AppointmentError> {
        if duration <= Duration::zero() {
            return Err(AppointmentError::InvalidTime(
                "Appointment duration must be positive".to_string(),
            ));
        }

        let (end, wrapped) = start.overflowing_add_signed(duration);
        if wrapped != 0 || end <= start {
            return Err(AppointmentError::InvalidTime(format!(
                "Appointment starting at {} with duration {} minutes does not fit within the day",
                start.format("%H:%M"),
                duration.num_minutes()
            )));
        }

        Ok(Self { start, end })
    }

    /// Construct from bounds already known to satisfy `start < end`.
    pub(crate) fn from_parts(start: NaiveTime, end: NaiveTime) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Half-open intersection test: the intervals share at least one instant
    /// iff `self.start < other.end && other.start < self.end`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A committed booking. Doctor name, specialty and hospital are snapshotted
/// at booking time so the record stays meaningful if the doctor is later
/// removed from the directory. Records are never mutated in place; the only
/// transitions are insert (booked) and delete (cancelled).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_email: String,
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub specialty: String,
    pub hospital: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::from_parts(self.start_time, self.end_time)
    }
}

/// Validated booking data handed to the store. Built by the booking service
/// only after the request has passed input validation and doctor resolution.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_email: String,
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub specialty: String,
    pub hospital: String,
    pub date: NaiveDate,
    pub slot: TimeInterval,
    pub issue: Option<String>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_email: String,
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Defaults to the configured slot length when omitted.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub issue: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Appointment conflicts with existing booking")]
    ConflictDetected,

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

// libs/appointment-cell/src/store.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use doctor_cell::models::DoctorId;

use crate::models::{Appointment, NewAppointment};

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("appointment overlaps a committed booking")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for appointment records. The store is the only owner of
/// the committed appointment set; the availability engine and the overlap
/// validator read through it and never write.
///
/// `insert` is the enforcement point for the core invariant: at most one
/// committed appointment per doctor per overlapping interval. A conforming
/// backend must re-check the overlap against committed records and commit
/// atomically, so that of two racing inserts for the same slot exactly one
/// succeeds and the other observes `StoreError::Conflict`.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, new: NewAppointment) -> Result<Appointment, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    /// Appointments for one doctor, optionally restricted to a single date,
    /// ordered by (date, start time).
    async fn list_by_doctor(
        &self,
        doctor_id: DoctorId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Appointment>, StoreError>;

    async fn list_by_patient(&self, patient_email: &str) -> Result<Vec<Appointment>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError>;

    /// Remove a committed appointment. The removal is irrevocable; there is
    /// no soft delete or audit trail.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

// ==============================================================================
// IN-MEMORY BACKEND
// ==============================================================================

type CalendarKey = (DoctorId, NaiveDate);

/// In-memory appointment backend. Records are grouped per doctor-day; the
/// overlap re-check and the insert happen under one write lock, which
/// serializes writers and closes the check-then-act race between the
/// advisory availability check and the commit.
pub struct MemoryAppointmentStore {
    inner: RwLock<BTreeMap<CalendarKey, Vec<Appointment>>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    async fn insert(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let mut inner = self.inner.write().await;

        let day = inner.entry((new.doctor_id, new.date)).or_default();
        if day.iter().any(|apt| apt.interval().overlaps(&new.slot)) {
            debug!(
                "Rejecting insert for doctor {} on {}: slot {}..{} already taken",
                new.doctor_id,
                new.date,
                new.slot.start().format("%H:%M"),
                new.slot.end().format("%H:%M"),
            );
            return Err(StoreError::Conflict);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_email: new.patient_email,
            patient_name: new.patient_name,
            doctor_id: new.doctor_id,
            doctor_name: new.doctor_name,
            specialty: new.specialty,
            hospital: new.hospital,
            date: new.date,
            start_time: new.slot.start(),
            end_time: new.slot.end(),
            issue: new.issue,
            created_at: Utc::now(),
        };

        day.push(appointment.clone());
        day.sort_by_key(|apt| apt.start_time);

        Ok(appointment)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .values()
            .flatten()
            .find(|apt| apt.id == id)
            .cloned())
    }

    async fn list_by_doctor(
        &self,
        doctor_id: DoctorId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        let appointments = inner
            .iter()
            .filter(|((doctor, day), _)| {
                *doctor == doctor_id && date.map_or(true, |wanted| *day == wanted)
            })
            .flat_map(|(_, day)| day.iter().cloned())
            .collect();
        Ok(appointments)
    }

    async fn list_by_patient(&self, patient_email: &str) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .values()
            .flatten()
            .filter(|apt| apt.patient_email == patient_email)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.values().flatten().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        for day in inner.values_mut() {
            if let Some(pos) = day.iter().position(|apt| apt.id == id) {
                day.remove(pos);
                return Ok(());
            }
        }

        Err(StoreError::NotFound)
    }
}

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{debug, warn};

use doctor_cell::models::DoctorId;

use crate::models::{Appointment, AppointmentError, TimeInterval};
use crate::store::AppointmentStore;

/// Decides whether a proposed booking conflicts with the committed calendar.
///
/// The availability answer here is advisory: the store re-checks under its
/// write lock at insert time. This service exists so availability queries
/// and pre-checks share one interval-arithmetic path with the store.
pub struct ConflictService {
    store: Arc<dyn AppointmentStore>,
}

impl ConflictService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// True iff `[start, start + duration)` intersects no committed
    /// appointment for this doctor on this date.
    ///
    /// A failed store read propagates as `StorageError`: an inconclusive
    /// read must never be reported as available.
    pub async fn is_available(
        &self,
        doctor_id: DoctorId,
        date: NaiveDate,
        start: NaiveTime,
        duration: Duration,
    ) -> Result<bool, AppointmentError> {
        let candidate = TimeInterval::starting_at(start, duration)?;

        let existing = self
            .store
            .list_by_doctor(doctor_id, Some(date))
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))?;

        let available = !Self::conflicts_with(&candidate, &existing);
        if !available {
            debug!(
                "Slot {} {} for doctor {} conflicts with a committed booking",
                date,
                start.format("%H:%M"),
                doctor_id
            );
        }

        Ok(available)
    }

    /// Pure half-open interval check against an already-fetched day.
    pub fn conflicts_with(candidate: &TimeInterval, existing: &[Appointment]) -> bool {
        existing.iter().any(|apt| apt.interval().overlaps(candidate))
    }

    /// Availability check used by the booking path; logs the rejection so a
    /// contended slot shows up in the request trace.
    pub async fn ensure_available(
        &self,
        doctor_id: DoctorId,
        date: NaiveDate,
        slot: &TimeInterval,
    ) -> Result<(), AppointmentError> {
        let existing = self
            .store
            .list_by_doctor(doctor_id, Some(date))
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))?;

        if Self::conflicts_with(slot, &existing) {
            warn!(
                "Booking rejected for doctor {} on {}: slot {}..{} already taken",
                doctor_id,
                date,
                slot.start().format("%H:%M"),
                slot.end().format("%H:%M"),
            );
            return Err(AppointmentError::ConflictDetected);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAppointment;
    use crate::store::MemoryAppointmentStore;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn store_with_booking(start: NaiveTime) -> Arc<MemoryAppointmentStore> {
        let store = Arc::new(MemoryAppointmentStore::new());
        store
            .insert(NewAppointment {
                patient_email: "pat@example.com".to_string(),
                patient_name: "Pat Doe".to_string(),
                doctor_id: DoctorId(1),
                doctor_name: "Dr. Adams".to_string(),
                specialty: "Cardiology".to_string(),
                hospital: "General Hospital".to_string(),
                date: "2024-06-01".parse().unwrap(),
                slot: TimeInterval::starting_at(start, Duration::hours(1)).unwrap(),
                issue: None,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn booked_slot_is_unavailable_and_next_slot_is_free() {
        let store = store_with_booking(t(10, 0)).await;
        let conflicts = ConflictService::new(store);
        let date: NaiveDate = "2024-06-01".parse().unwrap();

        let same = conflicts
            .is_available(DoctorId(1), date, t(10, 0), Duration::hours(1))
            .await
            .unwrap();
        assert!(!same);

        let next = conflicts
            .is_available(DoctorId(1), date, t(11, 0), Duration::hours(1))
            .await
            .unwrap();
        assert!(next);
    }

    #[tokio::test]
    async fn partial_overlap_is_unavailable() {
        let store = store_with_booking(t(10, 0)).await;
        let conflicts = ConflictService::new(store);
        let date: NaiveDate = "2024-06-01".parse().unwrap();

        let straddling = conflicts
            .is_available(DoctorId(1), date, t(9, 30), Duration::hours(1))
            .await
            .unwrap();
        assert!(!straddling);
    }

    #[tokio::test]
    async fn other_doctor_is_unaffected() {
        let store = store_with_booking(t(10, 0)).await;
        let conflicts = ConflictService::new(store);
        let date: NaiveDate = "2024-06-01".parse().unwrap();

        let other = conflicts
            .is_available(DoctorId(2), date, t(10, 0), Duration::hours(1))
            .await
            .unwrap();
        assert!(other);
    }

    #[tokio::test]
    async fn malformed_duration_is_invalid_input() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let conflicts = ConflictService::new(store);
        let date: NaiveDate = "2024-06-01".parse().unwrap();

        let err = conflicts
            .is_available(DoctorId(1), date, t(10, 0), Duration::zero())
            .await
            .unwrap_err();
        assert!(matches!(err, AppointmentError::InvalidTime(_)));
    }
}

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use doctor_cell::models::DoctorId;
use doctor_cell::store::DoctorStore;

use crate::models::AppointmentError;
use crate::services::conflict::ConflictService;
use crate::services::slots::SlotGrid;
use crate::store::AppointmentStore;

/// Computes the free slots of a doctor's day: the schedule grid minus every
/// slot that intersects a committed appointment.
///
/// A slot is excluded by true interval overlap, not by exact start-time
/// match, so a booking that does not align to the grid still blocks every
/// slot it touches.
pub struct AvailabilityService {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn DoctorStore>,
    grid: SlotGrid,
}

impl AvailabilityService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        directory: Arc<dyn DoctorStore>,
        grid: SlotGrid,
    ) -> Self {
        Self {
            store,
            directory,
            grid,
        }
    }

    /// Ordered start times of the free slots for `(doctor, date)`.
    pub async fn free_slots(
        &self,
        doctor_id: DoctorId,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, AppointmentError> {
        self.directory
            .get(doctor_id)
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))?
            .ok_or(AppointmentError::DoctorNotFound)?;

        let booked = self
            .store
            .list_by_doctor(doctor_id, Some(date))
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))?;

        let free: Vec<NaiveTime> = self
            .grid
            .slots()
            .into_iter()
            .filter(|slot| !ConflictService::conflicts_with(slot, &booked))
            .map(|slot| slot.start())
            .collect();

        debug!(
            "Doctor {} on {}: {} of {} grid slots free",
            doctor_id,
            date,
            free.len(),
            self.grid.slots().len()
        );

        Ok(free)
    }
}

// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;
use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::models::DoctorId;
use doctor_cell::store::DoctorStore;

use crate::models::{
    Appointment, AppointmentError, BookAppointmentRequest, NewAppointment, TimeInterval,
};
use crate::services::conflict::ConflictService;
use crate::services::slots::SlotGrid;
use crate::store::{AppointmentStore, StoreError};

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn DoctorStore>,
    conflict_service: ConflictService,
    grid: SlotGrid,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        directory: Arc<dyn DoctorStore>,
        grid: SlotGrid,
    ) -> Self {
        let conflict_service = ConflictService::new(Arc::clone(&store));
        Self {
            store,
            directory,
            conflict_service,
            grid,
        }
    }

    /// Book an appointment, committing it only if the slot is free.
    ///
    /// The pre-check through the conflict service produces the common-case
    /// rejection early; the store's atomic insert is the authority, so a
    /// concurrent winner turns the loser's insert into `ConflictDetected`
    /// rather than a double-booking.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking request for doctor {} on {} at {}",
            request.doctor_id,
            request.date,
            request.time.format("%H:%M")
        );

        self.validate_request(&request)?;

        let doctor = self
            .directory
            .get(request.doctor_id)
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))?
            .ok_or(AppointmentError::DoctorNotFound)?;

        let duration_minutes = request.duration_minutes.unwrap_or(self.grid.slot_minutes());
        let slot = TimeInterval::starting_at(
            request.time,
            chrono::Duration::minutes(duration_minutes as i64),
        )?;

        self.conflict_service
            .ensure_available(request.doctor_id, request.date, &slot)
            .await?;

        let new_appointment = NewAppointment {
            patient_email: request.patient_email,
            patient_name: request.patient_name,
            doctor_id: doctor.id,
            doctor_name: doctor.name,
            specialty: doctor.specialty,
            hospital: doctor.hospital,
            date: request.date,
            slot,
            issue: request.issue,
        };

        let appointment = match self.store.insert(new_appointment).await {
            Ok(appointment) => appointment,
            Err(StoreError::Conflict) => return Err(AppointmentError::ConflictDetected),
            Err(e) => return Err(AppointmentError::StorageError(e.to_string())),
        };

        info!(
            "Appointment {} booked with doctor {} on {} at {}",
            appointment.id,
            appointment.doctor_id,
            appointment.date,
            appointment.start_time.format("%H:%M")
        );
        Ok(appointment)
    }

    /// Cancel a committed appointment. Cancelling twice reports `NotFound`
    /// the second time.
    pub async fn cancel_appointment(&self, id: Uuid) -> Result<(), AppointmentError> {
        match self.store.delete(id).await {
            Ok(()) => {
                info!("Appointment {} cancelled", id);
                Ok(())
            }
            Err(StoreError::NotFound) => Err(AppointmentError::NotFound),
            Err(e) => Err(AppointmentError::StorageError(e.to_string())),
        }
    }

    pub async fn get_patient_appointments(
        &self,
        patient_email: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments for patient {}", patient_email);
        self.store
            .list_by_patient(patient_email)
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))
    }

    pub async fn get_doctor_appointments(
        &self,
        doctor_id: DoctorId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments for doctor {}", doctor_id);
        self.store
            .list_by_doctor(doctor_id, date)
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.store
            .list_all()
            .await
            .map_err(|e| AppointmentError::StorageError(e.to_string()))
    }

    fn validate_request(&self, request: &BookAppointmentRequest) -> Result<(), AppointmentError> {
        if request.patient_name.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "Patient name is required".to_string(),
            ));
        }
        if !email_pattern().is_match(&request.patient_email) {
            return Err(AppointmentError::ValidationError(format!(
                "Invalid patient email: {}",
                request.patient_email
            )));
        }
        if request.date < Utc::now().date_naive() {
            return Err(AppointmentError::ValidationError(format!(
                "Appointment date {} is in the past",
                request.date
            )));
        }
        Ok(())
    }
}

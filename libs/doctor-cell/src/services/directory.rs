use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, DoctorId};
use crate::store::{DoctorStore, StoreError};

pub struct DirectoryService {
    store: Arc<dyn DoctorStore>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn DoctorStore>) -> Self {
        Self { store }
    }

    /// Register a new doctor in the directory.
    pub async fn create_doctor(
        &self,
        request: CreateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        if request.name.trim().is_empty() {
            return Err(DoctorError::ValidationError(
                "Doctor name is required".to_string(),
            ));
        }
        if request.hospital.trim().is_empty() {
            return Err(DoctorError::ValidationError(
                "Hospital is required".to_string(),
            ));
        }
        if request.specialty.trim().is_empty() {
            return Err(DoctorError::ValidationError(
                "Specialty is required".to_string(),
            ));
        }

        let doctor = self.store.insert(request).await.map_err(map_store_error)?;

        info!("Doctor {} registered as {}", doctor.name, doctor.id);
        Ok(doctor)
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        self.store.list().await.map_err(map_store_error)
    }

    /// Resolve a doctor id, failing with `NotFound` for unknown references.
    pub async fn get_doctor(&self, id: DoctorId) -> Result<Doctor, DoctorError> {
        debug!("Looking up doctor {}", id);
        self.store
            .get(id)
            .await
            .map_err(map_store_error)?
            .ok_or(DoctorError::NotFound)
    }

    pub async fn delete_doctor(&self, id: DoctorId) -> Result<(), DoctorError> {
        match self.store.delete(id).await {
            Ok(()) => {
                info!("Doctor {} removed from directory", id);
                Ok(())
            }
            Err(StoreError::NotFound) => Err(DoctorError::NotFound),
            Err(e) => Err(map_store_error(e)),
        }
    }
}

fn map_store_error(e: StoreError) -> DoctorError {
    match e {
        StoreError::NotFound => DoctorError::NotFound,
        StoreError::Unavailable(msg) => DoctorError::StorageError(msg),
    }
}

// libs/doctor-cell/src/store.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{CreateDoctorRequest, Doctor, DoctorId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for the doctor directory. Injected into the directory
/// service so the handlers never touch a concrete backend.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Insert a new doctor, assigning the next sequential identifier.
    async fn insert(&self, request: CreateDoctorRequest) -> Result<Doctor, StoreError>;

    async fn get(&self, id: DoctorId) -> Result<Option<Doctor>, StoreError>;

    /// All doctors ordered by identifier.
    async fn list(&self) -> Result<Vec<Doctor>, StoreError>;

    async fn delete(&self, id: DoctorId) -> Result<(), StoreError>;
}

// ==============================================================================
// IN-MEMORY BACKEND
// ==============================================================================

#[derive(Default)]
struct DirectoryInner {
    next_id: u32,
    doctors: BTreeMap<DoctorId, Doctor>,
}

/// In-memory directory backend. Identifier assignment happens under the
/// write lock, so ids stay unique and monotonic under concurrent inserts
/// and are never reused after a delete.
pub struct MemoryDoctorStore {
    inner: RwLock<DirectoryInner>,
}

impl MemoryDoctorStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(DirectoryInner {
                next_id: 1,
                doctors: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryDoctorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DoctorStore for MemoryDoctorStore {
    async fn insert(&self, request: CreateDoctorRequest) -> Result<Doctor, StoreError> {
        let mut inner = self.inner.write().await;

        let id = DoctorId(inner.next_id);
        inner.next_id += 1;

        let doctor = Doctor {
            id,
            name: request.name,
            hospital: request.hospital,
            specialty: request.specialty,
            availability: request.availability,
            profile_photo: request.profile_photo,
            created_at: Utc::now(),
        };

        inner.doctors.insert(id, doctor.clone());
        Ok(doctor)
    }

    async fn get(&self, id: DoctorId) -> Result<Option<Doctor>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.doctors.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Doctor>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.doctors.values().cloned().collect())
    }

    async fn delete(&self, id: DoctorId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .doctors
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::{Doctor, DoctorError, DoctorId};
pub use store::{DoctorStore, MemoryDoctorStore};

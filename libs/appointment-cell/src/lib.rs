pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::{Appointment, AppointmentError, BookAppointmentRequest, TimeInterval};
pub use services::availability::AvailabilityService;
pub use services::booking::BookingService;
pub use services::conflict::ConflictService;
pub use services::slots::SlotGrid;
pub use store::{AppointmentStore, MemoryAppointmentStore};

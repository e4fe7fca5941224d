pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use doctor_cell::registry::ScheduleRegistry;
use shared_store::MemoryRepository;

use models::Appointment;

/// Shared state for the appointment cell: the appointment store plus the
/// doctor registry it consults for doctor and leave lookups.
pub struct AppointmentCellState {
    pub appointments: MemoryRepository<Appointment>,
    pub registry: Arc<ScheduleRegistry>,
}

impl AppointmentCellState {
    pub fn new(registry: Arc<ScheduleRegistry>) -> Self {
        Self {
            appointments: MemoryRepository::new(),
            registry,
        }
    }
}

pub use models::*;
pub use router::appointment_routes;

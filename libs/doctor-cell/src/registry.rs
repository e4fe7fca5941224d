use shared_store::MemoryRepository;

use crate::models::{Department, Doctor, LeaveEntry, Schedule};

/// Single in-memory owner of the doctor, department, schedule and leave
/// records for the session.
pub struct ScheduleRegistry {
    pub doctors: MemoryRepository<Doctor>,
    pub departments: MemoryRepository<Department>,
    pub schedules: MemoryRepository<Schedule>,
    pub leaves: MemoryRepository<LeaveEntry>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self {
            doctors: MemoryRepository::new(),
            departments: MemoryRepository::new(),
            schedules: MemoryRepository::new(),
            leaves: MemoryRepository::new(),
        }
    }
}

impl Default for ScheduleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

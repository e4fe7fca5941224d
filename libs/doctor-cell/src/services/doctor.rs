use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::models::{Department, Doctor, ScheduleError};
use crate::registry::ScheduleRegistry;

pub struct DoctorService {
    registry: Arc<ScheduleRegistry>,
}

impl DoctorService {
    pub fn new(registry: Arc<ScheduleRegistry>) -> Self {
        Self { registry }
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.registry.doctors.list().await
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, ScheduleError> {
        debug!("Fetching doctor: {}", doctor_id);

        self.registry
            .doctors
            .get(doctor_id)
            .await
            .ok_or(ScheduleError::DoctorNotFound)
    }

    pub async fn list_departments(&self) -> Vec<Department> {
        self.registry.departments.list().await
    }
}

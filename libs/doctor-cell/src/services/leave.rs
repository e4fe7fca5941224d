use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::{LeaveEntry, MarkLeaveRequest, ScheduleError};
use crate::registry::ScheduleRegistry;

/// Ad-hoc unavailability layered on top of the recurring schedules.
pub struct LeaveService {
    registry: Arc<ScheduleRegistry>,
}

impl LeaveService {
    pub fn new(registry: Arc<ScheduleRegistry>) -> Self {
        Self { registry }
    }

    /// Record a leave day for a doctor. Appointments already booked on that
    /// date are left alone; resolving them stays a staff decision.
    pub async fn mark_leave(
        &self,
        doctor_id: Uuid,
        request: MarkLeaveRequest,
    ) -> Result<LeaveEntry, ScheduleError> {
        debug!("Marking leave for doctor {} on {}", doctor_id, request.leave_date);

        if self.registry.doctors.get(doctor_id).await.is_none() {
            return Err(ScheduleError::DoctorNotFound);
        }

        let mut leaves = self.registry.leaves.write().await;
        if leaves
            .iter()
            .any(|leave| leave.doctor_id == doctor_id && leave.leave_date == request.leave_date)
        {
            return Err(ScheduleError::DuplicateLeave(request.leave_date));
        }

        let entry = LeaveEntry {
            id: Uuid::new_v4(),
            doctor_id,
            leave_date: request.leave_date,
            note: request.note.unwrap_or_default(),
            created_at: Utc::now(),
        };
        leaves.push(entry.clone());

        Ok(entry)
    }

    pub async fn list_for_doctor(&self, doctor_id: Uuid) -> Vec<LeaveEntry> {
        self.registry
            .leaves
            .filter(|leave| leave.doctor_id == doctor_id)
            .await
    }

    pub async fn is_on_leave(&self, doctor_id: Uuid, date: NaiveDate) -> bool {
        self.registry
            .leaves
            .any(|leave| leave.doctor_id == doctor_id && leave.leave_date == date)
            .await
    }
}

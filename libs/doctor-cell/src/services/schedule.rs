use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    CreateScheduleRequest, Schedule, ScheduleError, ScheduleFilters, ScheduleStatus,
};
use crate::registry::ScheduleRegistry;

/// Narrow `schedules` to the entries matching every set filter field.
/// Matching is exact equality; unset fields are wildcards.
pub fn filter_schedules(schedules: &[Schedule], filters: &ScheduleFilters) -> Vec<Schedule> {
    schedules
        .iter()
        .filter(|schedule| {
            filters.doctor_id.map_or(true, |id| schedule.doctor_id == id)
                && filters
                    .department_id
                    .map_or(true, |id| schedule.department_id == id)
                && filters
                    .day_of_week
                    .map_or(true, |day| schedule.day_of_week == day)
                && filters.status.map_or(true, |status| schedule.status == status)
        })
        .cloned()
        .collect()
}

/// How many filter fields are set. Presentation feedback only.
pub fn active_filter_count(filters: &ScheduleFilters) -> usize {
    [
        filters.doctor_id.is_some(),
        filters.department_id.is_some(),
        filters.day_of_week.is_some(),
        filters.status.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count()
}

/// Duplicate every active schedule whose validity window covered the same
/// day one week before `today`. Copies get fresh ids and start their
/// validity at `today`; the input is left untouched and merging the batch
/// is the caller's job.
pub fn copy_week(schedules: &[Schedule], today: NaiveDate) -> Vec<Schedule> {
    let last_week = today - Duration::days(7);

    schedules
        .iter()
        .filter(|schedule| schedule.status == ScheduleStatus::Active && schedule.covers(last_week))
        .map(|schedule| Schedule {
            id: Uuid::new_v4(),
            valid_from: today,
            created_at: Utc::now(),
            ..schedule.clone()
        })
        .collect()
}

pub struct ScheduleService {
    registry: Arc<ScheduleRegistry>,
}

impl ScheduleService {
    pub fn new(registry: Arc<ScheduleRegistry>) -> Self {
        Self { registry }
    }

    pub async fn list_filtered(&self, filters: &ScheduleFilters) -> Vec<Schedule> {
        let schedules = self.registry.schedules.list().await;
        filter_schedules(&schedules, filters)
    }

    pub async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<Schedule, ScheduleError> {
        debug!("Creating schedule for doctor: {}", request.doctor_id);

        if request.day_of_week < 0 || request.day_of_week > 6 {
            return Err(ScheduleError::InvalidDayOfWeek(request.day_of_week));
        }
        if request.start_time >= request.end_time {
            return Err(ScheduleError::InvalidTimeRange);
        }
        if let Some(valid_to) = request.valid_to {
            if request.valid_from > valid_to {
                return Err(ScheduleError::InvalidValidityWindow);
            }
        }

        let doctor = self
            .registry
            .doctors
            .get(request.doctor_id)
            .await
            .ok_or(ScheduleError::DoctorNotFound)?;

        let schedule = Schedule {
            id: Uuid::new_v4(),
            doctor_id: doctor.id,
            department_id: doctor.department_id,
            day_of_week: request.day_of_week,
            start_time: request.start_time,
            end_time: request.end_time,
            valid_from: request.valid_from,
            valid_to: request.valid_to,
            status: ScheduleStatus::Active,
            created_at: Utc::now(),
        };

        let schedule = self
            .registry
            .schedules
            .create(schedule)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))?;

        debug!("Schedule created with ID: {}", schedule.id);
        Ok(schedule)
    }

    pub async fn deactivate_schedule(&self, schedule_id: Uuid) -> Result<Schedule, ScheduleError> {
        debug!("Deactivating schedule: {}", schedule_id);

        self.registry
            .schedules
            .update(schedule_id, |schedule| {
                schedule.status = ScheduleStatus::Inactive
            })
            .await
            .map_err(|_| ScheduleError::ScheduleNotFound)
    }

    /// Copy last week's active schedules into a fresh batch starting at
    /// `today` and merge it into the registry. An empty batch signals that
    /// nothing was eligible.
    pub async fn copy_last_week(&self, today: NaiveDate) -> Result<Vec<Schedule>, ScheduleError> {
        let schedules = self.registry.schedules.list().await;
        let batch = copy_week(&schedules, today);

        if batch.is_empty() {
            info!("No active schedules covered last week; nothing to copy");
            return Ok(batch);
        }

        let batch = self
            .registry
            .schedules
            .create_many(batch)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))?;

        info!("Copied {} schedules forward to {}", batch.len(), today);
        Ok(batch)
    }
}

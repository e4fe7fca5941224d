use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use doctor_cell::services::leave::LeaveService;

use crate::models::TimeSlot;
use crate::AppointmentCellState;

pub const SLOT_MINUTES: i64 = 30;
pub const SLOTS_PER_DAY: usize = 16;

const DAY_START_HOUR: u32 = 9;
const DAY_END_HOUR: u32 = 17;

pub fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(DAY_START_HOUR, 0, 0).unwrap()
}

pub fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(DAY_END_HOUR, 0, 0).unwrap()
}

/// The fixed grid of bookable start times: every 30 minutes from 09:00
/// inclusive to 17:00 exclusive.
pub fn slot_grid() -> Vec<NaiveTime> {
    (0..SLOTS_PER_DAY as i64)
        .map(|index| day_start() + Duration::minutes(index * SLOT_MINUTES))
        .collect()
}

/// Whether `time` lands on a slot boundary within the working day.
pub fn is_slot_aligned(time: NaiveTime) -> bool {
    time >= day_start()
        && time < day_end()
        && time.signed_duration_since(day_start()).num_minutes() % SLOT_MINUTES == 0
}

pub struct SlotService {
    state: Arc<AppointmentCellState>,
}

impl SlotService {
    pub fn new(state: Arc<AppointmentCellState>) -> Self {
        Self { state }
    }

    /// Build the day's slot grid for a doctor, marking each slot against the
    /// appointment store. Recomputed on every call; nothing is cached.
    ///
    /// A leave entry for the date blanks the whole day: every slot comes back
    /// unavailable with no appointment attached.
    pub async fn generate_slots(&self, doctor_id: Uuid, date: NaiveDate) -> Vec<TimeSlot> {
        let leave_service = LeaveService::new(self.state.registry.clone());
        if leave_service.is_on_leave(doctor_id, date).await {
            debug!("Doctor {} is on leave on {}; all slots unavailable", doctor_id, date);
            return slot_grid()
                .into_iter()
                .map(|start_time| TimeSlot {
                    start_time,
                    end_time: start_time + Duration::minutes(SLOT_MINUTES),
                    available: false,
                    appointment_id: None,
                })
                .collect();
        }

        let booked = self
            .state
            .appointments
            .filter(|appointment| {
                appointment.doctor_id == doctor_id
                    && appointment.appointment_date == date
                    && appointment.occupies_slot()
            })
            .await;

        slot_grid()
            .into_iter()
            .map(|start_time| {
                let occupant = booked
                    .iter()
                    .find(|appointment| appointment.start_time == start_time);

                TimeSlot {
                    start_time,
                    end_time: start_time + Duration::minutes(SLOT_MINUTES),
                    available: occupant.is_none(),
                    appointment_id: occupant.map(|appointment| appointment.id),
                }
            })
            .collect()
    }
}

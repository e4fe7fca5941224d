use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_store::HasId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
}

/// Reference data; seeded once per session and treated as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub department_id: Uuid,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Inactive,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Active => write!(f, "active"),
            ScheduleStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A doctor's recurring weekly availability definition. Deactivated rather
/// than deleted, so historical entries stay queryable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub department_id: Uuid,
    pub day_of_week: i32, // 0 = Sunday, 1 = Monday, etc.
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>, // None = open-ended
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    /// Whether the validity window covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.map_or(true, |until| date <= until)
    }
}

/// A single date on which a doctor's recurring schedule does not apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub leave_date: NaiveDate,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Filter set for schedule listings. An unset field is a wildcard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFilters {
    pub doctor_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub day_of_week: Option<i32>,
    pub status: Option<ScheduleStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub doctor_id: Uuid,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkLeaveRequest {
    pub leave_date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ScheduleError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Schedule not found")]
    ScheduleNotFound,

    #[error("Day of week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidDayOfWeek(i32),

    #[error("Start time must be before end time")]
    InvalidTimeRange,

    #[error("Schedule validity window ends before it starts")]
    InvalidValidityWindow,

    #[error("Leave already recorded for {0}")]
    DuplicateLeave(NaiveDate),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl HasId for Department {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Doctor {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Schedule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for LeaveEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

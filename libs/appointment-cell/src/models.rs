use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_store::HasId;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub department: String,
    pub room: Option<String>,
    pub notes: Option<String>,
    pub priority: AppointmentPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// End time derived from start time and duration.
    pub fn end_time(&self) -> NaiveTime {
        self.start_time + Duration::minutes(self.duration_minutes as i64)
    }

    /// Whether this appointment holds its slot. Only cancellation frees it.
    pub fn occupies_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Procedure,
    Emergency,
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Consultation => write!(f, "consultation"),
            AppointmentType::FollowUp => write!(f, "follow_up"),
            AppointmentType::Procedure => write!(f, "procedure"),
            AppointmentType::Emergency => write!(f, "emergency"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// One bookable 30-minute unit of a doctor's day. Derived on demand from
/// the appointment store; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available: bool,
    pub appointment_id: Option<Uuid>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: Option<i32>, // defaults to one slot
    pub appointment_type: AppointmentType,
    pub room: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<AppointmentPriority>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub new_date: NaiveDate,
    pub new_start_time: NaiveTime,
    pub new_duration_minutes: Option<i32>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Appointment slot not available")]
    SlotNotAvailable,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor is not accepting appointments")]
    DoctorNotAvailable,

    #[error("Doctor is on leave on {0}")]
    DoctorOnLeave(NaiveDate),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment cannot be rescheduled in status {0}")]
    NotReschedulable(AppointmentStatus),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl HasId for Appointment {
    fn id(&self) -> Uuid {
        self.id
    }
}

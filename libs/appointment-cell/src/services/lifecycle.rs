use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    pub fn validate_status_transition(
        &self,
        current: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current, next);

        if !self.valid_transitions(current).contains(&next) {
            warn!("Invalid status transition attempted: {} -> {}", current, next);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current,
                to: next,
            });
        }

        Ok(())
    }

    /// All valid next statuses for a given current status. Cancellation and
    /// no-show stay reachable until a terminal status is hit.
    pub fn valid_transitions(&self, current: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::InProgress,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            AppointmentStatus::InProgress => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => vec![],
        }
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

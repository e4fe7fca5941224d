use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::AppointmentCellState;

pub fn appointment_routes(state: Arc<AppointmentCellState>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/slots", get(handlers::get_time_slots))
        .route("/by-date/{date}", get(handlers::list_appointments_by_date))
        .route(
            "/by-doctor/{doctor_id}",
            get(handlers::list_appointments_by_doctor),
        )
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route(
            "/{appointment_id}/status",
            patch(handlers::update_appointment_status),
        )
        .route(
            "/{appointment_id}/reschedule",
            patch(handlers::reschedule_appointment),
        )
        .with_state(state)
}

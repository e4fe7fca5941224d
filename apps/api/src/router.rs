use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::{appointment_routes, AppointmentCellState};
use doctor_cell::{doctor_routes, ScheduleRegistry};

pub fn create_router(
    registry: Arc<ScheduleRegistry>,
    appointments: Arc<AppointmentCellState>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "HMS scheduling API is running!" }))
        .merge(doctor_routes(registry))
        .nest("/appointments", appointment_routes(appointments))
}

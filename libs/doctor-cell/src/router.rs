use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::registry::ScheduleRegistry;

pub fn doctor_routes(state: Arc<ScheduleRegistry>) -> Router {
    Router::new()
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route(
            "/doctors/{doctor_id}/leaves",
            get(handlers::list_leaves).post(handlers::mark_leave),
        )
        .route("/departments", get(handlers::list_departments))
        .route(
            "/schedules",
            get(handlers::list_schedules).post(handlers::create_schedule),
        )
        .route(
            "/schedules/copy-last-week",
            post(handlers::copy_last_week_schedules),
        )
        .route(
            "/schedules/{schedule_id}/deactivate",
            patch(handlers::deactivate_schedule),
        )
        .with_state(state)
}

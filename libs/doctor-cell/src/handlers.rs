use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{CreateScheduleRequest, MarkLeaveRequest, ScheduleError, ScheduleFilters};
use crate::registry::ScheduleRegistry;
use crate::services::{
    doctor::DoctorService,
    leave::LeaveService,
    schedule::{self, ScheduleService},
};

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::DoctorNotFound | ScheduleError::ScheduleNotFound => {
                AppError::NotFound(err.to_string())
            }
            ScheduleError::InvalidDayOfWeek(_)
            | ScheduleError::InvalidTimeRange
            | ScheduleError::InvalidValidityWindow => AppError::ValidationError(err.to_string()),
            ScheduleError::DuplicateLeave(_) => AppError::Conflict(err.to_string()),
            ScheduleError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ScheduleRegistry>>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state);
    let doctors = doctor_service.list_doctors().await;
    let total = doctors.len();

    Ok(Json(json!({
        "doctors": doctors,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ScheduleRegistry>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state);
    let doctor = doctor_service.get_doctor(doctor_id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<ScheduleRegistry>>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state);
    let departments = doctor_service.list_departments().await;
    let total = departments.len();

    Ok(Json(json!({
        "departments": departments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ScheduleRegistry>>,
    Query(filters): Query<ScheduleFilters>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(state);
    let schedules = schedule_service.list_filtered(&filters).await;
    let total = schedules.len();
    let active_filter_count = schedule::active_filter_count(&filters);

    Ok(Json(json!({
        "schedules": schedules,
        "total": total,
        "active_filter_count": active_filter_count
    })))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ScheduleRegistry>>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(state);
    let schedule = schedule_service.create_schedule(request).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn deactivate_schedule(
    State(state): State<Arc<ScheduleRegistry>>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(state);
    let schedule = schedule_service.deactivate_schedule(schedule_id).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn copy_last_week_schedules(
    State(state): State<Arc<ScheduleRegistry>>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(state);
    let today = Utc::now().date_naive();
    let batch = schedule_service.copy_last_week(today).await?;
    let copied = batch.len();

    Ok(Json(json!({
        "copied": copied,
        "schedules": batch
    })))
}

#[axum::debug_handler]
pub async fn mark_leave(
    State(state): State<Arc<ScheduleRegistry>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<MarkLeaveRequest>,
) -> Result<Json<Value>, AppError> {
    let leave_service = LeaveService::new(state);
    let entry = leave_service.mark_leave(doctor_id, request).await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn list_leaves(
    State(state): State<Arc<ScheduleRegistry>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let leave_service = LeaveService::new(state);
    let leaves = leave_service.list_for_doctor(doctor_id).await;
    let total = leaves.len();

    Ok(Json(json!({
        "leaves": leaves,
        "total": total
    })))
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    AppointmentError, BookAppointmentRequest, RescheduleAppointmentRequest, UpdateStatusRequest,
};
use crate::services::{booking::BookingService, slots::SlotService};
use crate::AppointmentCellState;

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound | AppointmentError::DoctorNotFound => {
                AppError::NotFound(err.to_string())
            }
            AppointmentError::SlotNotAvailable
            | AppointmentError::DoctorNotAvailable
            | AppointmentError::DoctorOnLeave(_)
            | AppointmentError::InvalidStatusTransition { .. }
            | AppointmentError::NotReschedulable(_) => AppError::Conflict(err.to_string()),
            AppointmentError::InvalidTime(_) | AppointmentError::ValidationError(_) => {
                AppError::ValidationError(err.to_string())
            }
            AppointmentError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DoctorAppointmentsQuery {
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state);
    let appointment = booking_service.book_appointment(request).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state);
    let appointment = booking_service.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments_by_date(
    State(state): State<Arc<AppointmentCellState>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state);
    let appointments = booking_service.get_appointments_by_date(date).await;
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn list_appointments_by_doctor(
    State(state): State<Arc<AppointmentCellState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<DoctorAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state);
    let appointments = booking_service
        .get_appointments_by_doctor(doctor_id, query.date)
        .await;
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state);
    let appointment = booking_service
        .update_status(appointment_id, request.status)
        .await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state);
    let appointment = booking_service.reschedule(appointment_id, request).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_time_slots(
    State(state): State<Arc<AppointmentCellState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let slot_service = SlotService::new(state);
    let slots = slot_service.generate_slots(query.doctor_id, query.date).await;

    Ok(Json(json!({
        "doctor_id": query.doctor_id,
        "date": query.date,
        "slots": slots
    })))
}

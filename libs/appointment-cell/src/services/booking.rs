use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::services::leave::LeaveService;

use crate::models::{
    Appointment, AppointmentError, AppointmentPriority, AppointmentStatus, BookAppointmentRequest,
    RescheduleAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::slots::{day_end, is_slot_aligned, SLOT_MINUTES};
use crate::AppointmentCellState;

pub struct BookingService {
    state: Arc<AppointmentCellState>,
}

impl BookingService {
    pub fn new(state: Arc<AppointmentCellState>) -> Self {
        Self { state }
    }

    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Booking appointment for patient {} with doctor {} on {}",
            request.patient_id, request.doctor_id, request.appointment_date
        );

        let doctor = self
            .state
            .registry
            .doctors
            .get(request.doctor_id)
            .await
            .ok_or(AppointmentError::DoctorNotFound)?;
        if !doctor.is_active {
            return Err(AppointmentError::DoctorNotAvailable);
        }

        let duration_minutes = request.duration_minutes.unwrap_or(SLOT_MINUTES as i32);
        validate_slot_timing(request.start_time, duration_minutes)?;

        let leave_service = LeaveService::new(self.state.registry.clone());
        if leave_service
            .is_on_leave(request.doctor_id, request.appointment_date)
            .await
        {
            return Err(AppointmentError::DoctorOnLeave(request.appointment_date));
        }

        let department = match self.state.registry.departments.get(doctor.department_id).await {
            Some(department) => department.name,
            None => doctor.specialization.clone(),
        };

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            patient_name: request.patient_name,
            doctor_id: doctor.id,
            doctor_name: doctor.full_name(),
            appointment_date: request.appointment_date,
            start_time: request.start_time,
            duration_minutes,
            appointment_type: request.appointment_type,
            status: AppointmentStatus::Scheduled,
            department,
            room: request.room,
            notes: request.notes,
            priority: request.priority.unwrap_or(AppointmentPriority::Medium),
            created_at: now,
            updated_at: now,
        };

        // Conflict check and insert under one guard so concurrent bookings
        // for the same slot serialize.
        {
            let mut appointments = self.state.appointments.write().await;
            if appointments.iter().any(|existing| {
                existing.doctor_id == appointment.doctor_id
                    && existing.appointment_date == appointment.appointment_date
                    && existing.start_time == appointment.start_time
                    && existing.occupies_slot()
            }) {
                warn!(
                    "Slot {} {} already taken for doctor {}",
                    appointment.appointment_date, appointment.start_time, appointment.doctor_id
                );
                return Err(AppointmentError::SlotNotAvailable);
            }
            appointments.push(appointment.clone());
        }

        info!(
            "Appointment {} booked for {} at {}",
            appointment.id, appointment.appointment_date, appointment.start_time
        );
        Ok(appointment)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        self.state
            .appointments
            .get(appointment_id)
            .await
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn get_appointments_by_date(&self, date: NaiveDate) -> Vec<Appointment> {
        self.state
            .appointments
            .filter(|appointment| appointment.appointment_date == date)
            .await
    }

    pub async fn get_appointments_by_doctor(
        &self,
        doctor_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Vec<Appointment> {
        self.state
            .appointments
            .filter(|appointment| {
                appointment.doctor_id == doctor_id
                    && date.map_or(true, |d| appointment.appointment_date == d)
            })
            .await
    }

    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let lifecycle = AppointmentLifecycleService::new();

        let mut appointments = self.state.appointments.write().await;
        let appointment = appointments
            .iter_mut()
            .find(|appointment| appointment.id == appointment_id)
            .ok_or(AppointmentError::NotFound)?;

        lifecycle.validate_status_transition(appointment.status, new_status)?;

        appointment.status = new_status;
        appointment.updated_at = Utc::now();

        info!("Appointment {} moved to {}", appointment_id, new_status);
        Ok(appointment.clone())
    }

    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Rescheduling appointment {}", appointment_id);

        let current = self.get_appointment(appointment_id).await?;
        if !matches!(
            current.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        ) {
            return Err(AppointmentError::NotReschedulable(current.status));
        }

        let duration_minutes = request
            .new_duration_minutes
            .unwrap_or(current.duration_minutes);
        validate_slot_timing(request.new_start_time, duration_minutes)?;

        let leave_service = LeaveService::new(self.state.registry.clone());
        if leave_service
            .is_on_leave(current.doctor_id, request.new_date)
            .await
        {
            return Err(AppointmentError::DoctorOnLeave(request.new_date));
        }

        let mut appointments = self.state.appointments.write().await;
        if appointments.iter().any(|existing| {
            existing.id != appointment_id
                && existing.doctor_id == current.doctor_id
                && existing.appointment_date == request.new_date
                && existing.start_time == request.new_start_time
                && existing.occupies_slot()
        }) {
            return Err(AppointmentError::SlotNotAvailable);
        }

        let appointment = appointments
            .iter_mut()
            .find(|appointment| appointment.id == appointment_id)
            .ok_or(AppointmentError::NotFound)?;
        appointment.appointment_date = request.new_date;
        appointment.start_time = request.new_start_time;
        appointment.duration_minutes = duration_minutes;
        appointment.updated_at = Utc::now();

        info!(
            "Appointment {} rescheduled to {} at {}",
            appointment_id, request.new_date, request.new_start_time
        );
        Ok(appointment.clone())
    }
}

fn validate_slot_timing(
    start_time: NaiveTime,
    duration_minutes: i32,
) -> Result<(), AppointmentError> {
    if !is_slot_aligned(start_time) {
        return Err(AppointmentError::InvalidTime(format!(
            "Start time {} is not on a {}-minute boundary between 09:00 and 17:00",
            start_time, SLOT_MINUTES
        )));
    }

    if duration_minutes <= 0 || duration_minutes as i64 % SLOT_MINUTES != 0 {
        return Err(AppointmentError::InvalidTime(format!(
            "Duration must be a positive multiple of {} minutes",
            SLOT_MINUTES
        )));
    }

    let end_time = start_time + Duration::minutes(duration_minutes as i64);
    if end_time > day_end() || end_time <= start_time {
        return Err(AppointmentError::InvalidTime(
            "Appointment must end by 17:00".to_string(),
        ));
    }

    Ok(())
}

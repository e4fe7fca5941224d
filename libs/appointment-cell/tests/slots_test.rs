use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use appointment_cell::models::{AppointmentStatus, AppointmentType, BookAppointmentRequest};
use appointment_cell::services::booking::BookingService;
use appointment_cell::services::slots::{SlotService, SLOTS_PER_DAY, SLOT_MINUTES};
use appointment_cell::AppointmentCellState;
use doctor_cell::models::{Department, Doctor, MarkLeaveRequest};
use doctor_cell::registry::ScheduleRegistry;
use doctor_cell::services::leave::LeaveService;

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
}

async fn setup() -> (Arc<AppointmentCellState>, Doctor) {
    let registry = Arc::new(ScheduleRegistry::new());

    let department = registry
        .departments
        .create(Department {
            id: Uuid::new_v4(),
            name: "Orthopedics".to_string(),
        })
        .await
        .expect("seed department");

    let doctor = registry
        .doctors
        .create(Doctor {
            id: Uuid::new_v4(),
            first_name: "Priya".to_string(),
            last_name: "Nair".to_string(),
            specialization: "Orthopedic Surgery".to_string(),
            department_id: department.id,
            avatar_url: None,
            is_active: true,
            created_at: Utc::now(),
        })
        .await
        .expect("seed doctor");

    let state = Arc::new(AppointmentCellState::new(registry));
    (state, doctor)
}

fn book_request(doctor_id: Uuid, day: &str, hour: u32, minute: u32) -> BookAppointmentRequest {
    BookAppointmentRequest {
        patient_id: Uuid::new_v4(),
        patient_name: "Alex Morgan".to_string(),
        doctor_id,
        appointment_date: date(day),
        start_time: time(hour, minute),
        duration_minutes: None,
        appointment_type: AppointmentType::Consultation,
        room: None,
        notes: None,
        priority: None,
    }
}

#[tokio::test]
async fn grid_is_sixteen_half_hour_slots_from_nine() {
    let (state, doctor) = setup().await;
    let service = SlotService::new(state);

    let slots = service.generate_slots(doctor.id, date("2025-03-10")).await;

    assert_eq!(slots.len(), SLOTS_PER_DAY);
    assert_eq!(slots[0].start_time, time(9, 0));
    assert_eq!(slots[SLOTS_PER_DAY - 1].start_time, time(16, 30));

    for pair in slots.windows(2) {
        let gap = pair[1].start_time.signed_duration_since(pair[0].start_time);
        assert_eq!(gap.num_minutes(), SLOT_MINUTES);
    }
    for slot in &slots {
        let length = slot.end_time.signed_duration_since(slot.start_time);
        assert_eq!(length.num_minutes(), SLOT_MINUTES);
        assert!(slot.available);
        assert!(slot.appointment_id.is_none());
    }
}

#[tokio::test]
async fn generation_is_idempotent_for_unchanged_store() {
    let (state, doctor) = setup().await;
    BookingService::new(state.clone())
        .book_appointment(book_request(doctor.id, "2025-03-10", 11, 0))
        .await
        .expect("booking");

    let service = SlotService::new(state);
    let first = service.generate_slots(doctor.id, date("2025-03-10")).await;
    let second = service.generate_slots(doctor.id, date("2025-03-10")).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn booked_slot_carries_the_appointment_id() {
    let (state, doctor) = setup().await;
    let appointment = BookingService::new(state.clone())
        .book_appointment(book_request(doctor.id, "2025-03-10", 9, 0))
        .await
        .expect("booking");

    let slots = SlotService::new(state)
        .generate_slots(doctor.id, date("2025-03-10"))
        .await;

    assert!(!slots[0].available);
    assert_eq!(slots[0].appointment_id, Some(appointment.id));
    assert!(slots[1..].iter().all(|slot| slot.available));
}

#[tokio::test]
async fn other_days_and_doctors_do_not_block_slots() {
    let (state, doctor) = setup().await;
    BookingService::new(state.clone())
        .book_appointment(book_request(doctor.id, "2025-03-11", 9, 0))
        .await
        .expect("booking");

    let service = SlotService::new(state);

    let same_doctor_other_day = service.generate_slots(doctor.id, date("2025-03-10")).await;
    assert!(same_doctor_other_day.iter().all(|slot| slot.available));

    let other_doctor = service
        .generate_slots(Uuid::new_v4(), date("2025-03-11"))
        .await;
    assert_eq!(other_doctor.len(), SLOTS_PER_DAY);
    assert!(other_doctor.iter().all(|slot| slot.available));
}

#[tokio::test]
async fn cancelled_appointment_releases_its_slot() {
    let (state, doctor) = setup().await;
    let booking_service = BookingService::new(state.clone());

    let appointment = booking_service
        .book_appointment(book_request(doctor.id, "2025-03-10", 9, 0))
        .await
        .expect("booking");
    booking_service
        .update_status(appointment.id, AppointmentStatus::Cancelled)
        .await
        .expect("cancel");

    let slots = SlotService::new(state)
        .generate_slots(doctor.id, date("2025-03-10"))
        .await;

    assert!(slots[0].available);
    assert!(slots[0].appointment_id.is_none());
}

#[tokio::test]
async fn leave_day_reports_every_slot_unavailable() {
    let (state, doctor) = setup().await;

    LeaveService::new(state.registry.clone())
        .mark_leave(
            doctor.id,
            MarkLeaveRequest {
                leave_date: date("2025-03-10"),
                note: None,
            },
        )
        .await
        .expect("mark leave");

    let slots = SlotService::new(state)
        .generate_slots(doctor.id, date("2025-03-10"))
        .await;

    assert_eq!(slots.len(), SLOTS_PER_DAY);
    assert!(slots.iter().all(|slot| !slot.available));
    assert!(slots.iter().all(|slot| slot.appointment_id.is_none()));
}

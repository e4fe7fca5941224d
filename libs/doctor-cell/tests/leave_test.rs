use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use doctor_cell::models::{Department, Doctor, MarkLeaveRequest, ScheduleError};
use doctor_cell::registry::ScheduleRegistry;
use doctor_cell::services::leave::LeaveService;

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

async fn registry_with_doctor() -> (Arc<ScheduleRegistry>, Doctor) {
    let registry = Arc::new(ScheduleRegistry::new());

    let department = registry
        .departments
        .create(Department {
            id: Uuid::new_v4(),
            name: "Pediatrics".to_string(),
        })
        .await
        .expect("seed department");

    let doctor = registry
        .doctors
        .create(Doctor {
            id: Uuid::new_v4(),
            first_name: "James".to_string(),
            last_name: "Okafor".to_string(),
            specialization: "Pediatrics".to_string(),
            department_id: department.id,
            avatar_url: None,
            is_active: true,
            created_at: Utc::now(),
        })
        .await
        .expect("seed doctor");

    (registry, doctor)
}

#[tokio::test]
async fn mark_leave_records_entry_with_default_note() {
    let (registry, doctor) = registry_with_doctor().await;
    let service = LeaveService::new(registry.clone());

    let entry = service
        .mark_leave(
            doctor.id,
            MarkLeaveRequest {
                leave_date: date("2025-01-10"),
                note: None,
            },
        )
        .await
        .expect("mark leave");

    assert_eq!(entry.doctor_id, doctor.id);
    assert_eq!(entry.leave_date, date("2025-01-10"));
    assert_eq!(entry.note, "");
    assert_eq!(registry.leaves.count().await, 1);
}

#[tokio::test]
async fn mark_leave_keeps_the_note() {
    let (registry, doctor) = registry_with_doctor().await;
    let service = LeaveService::new(registry);

    let entry = service
        .mark_leave(
            doctor.id,
            MarkLeaveRequest {
                leave_date: date("2025-01-10"),
                note: Some("Conference".to_string()),
            },
        )
        .await
        .expect("mark leave");

    assert_eq!(entry.note, "Conference");
}

#[tokio::test]
async fn duplicate_leave_for_same_date_is_rejected() {
    let (registry, doctor) = registry_with_doctor().await;
    let service = LeaveService::new(registry);

    let request = MarkLeaveRequest {
        leave_date: date("2025-01-10"),
        note: None,
    };
    service
        .mark_leave(doctor.id, request.clone())
        .await
        .expect("first entry");

    assert_matches!(
        service.mark_leave(doctor.id, request).await,
        Err(ScheduleError::DuplicateLeave(d)) if d == date("2025-01-10")
    );
}

#[tokio::test]
async fn mark_leave_requires_known_doctor() {
    let (registry, _doctor) = registry_with_doctor().await;
    let service = LeaveService::new(registry);

    assert_matches!(
        service
            .mark_leave(
                Uuid::new_v4(),
                MarkLeaveRequest {
                    leave_date: date("2025-01-10"),
                    note: None,
                },
            )
            .await,
        Err(ScheduleError::DoctorNotFound)
    );
}

#[tokio::test]
async fn is_on_leave_matches_only_the_marked_date() {
    let (registry, doctor) = registry_with_doctor().await;
    let service = LeaveService::new(registry);

    service
        .mark_leave(
            doctor.id,
            MarkLeaveRequest {
                leave_date: date("2025-01-10"),
                note: None,
            },
        )
        .await
        .expect("mark leave");

    assert!(service.is_on_leave(doctor.id, date("2025-01-10")).await);
    assert!(!service.is_on_leave(doctor.id, date("2025-01-11")).await);
}

#[tokio::test]
async fn list_for_doctor_excludes_other_doctors() {
    let (registry, doctor) = registry_with_doctor().await;

    let other = registry
        .doctors
        .create(Doctor {
            id: Uuid::new_v4(),
            first_name: "Priya".to_string(),
            last_name: "Nair".to_string(),
            specialization: "Orthopedic Surgery".to_string(),
            department_id: doctor.department_id,
            avatar_url: None,
            is_active: true,
            created_at: Utc::now(),
        })
        .await
        .expect("seed doctor");

    let service = LeaveService::new(registry);
    service
        .mark_leave(
            doctor.id,
            MarkLeaveRequest {
                leave_date: date("2025-01-10"),
                note: None,
            },
        )
        .await
        .expect("mark leave");
    service
        .mark_leave(
            other.id,
            MarkLeaveRequest {
                leave_date: date("2025-01-10"),
                note: None,
            },
        )
        .await
        .expect("mark leave");

    let leaves = service.list_for_doctor(doctor.id).await;
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].doctor_id, doctor.id);
}

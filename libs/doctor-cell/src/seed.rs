use chrono::{Duration, NaiveTime, Utc};
use tracing::info;
use uuid::Uuid;

use shared_store::StoreError;

use crate::models::{Department, Doctor, Schedule, ScheduleStatus};
use crate::registry::ScheduleRegistry;

fn department(name: &str) -> Department {
    Department {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

fn doctor(first_name: &str, last_name: &str, specialization: &str, department_id: Uuid) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        specialization: specialization.to_string(),
        department_id,
        avatar_url: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Seed the registry with the demo catalog. There is no backing database;
/// reference data lives in memory for the lifetime of the process.
pub async fn seed_demo_data(registry: &ScheduleRegistry) -> Result<(), StoreError> {
    let today = Utc::now().date_naive();
    let workday_start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let workday_end = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

    let cardiology = registry.departments.create(department("Cardiology")).await?;
    let pediatrics = registry.departments.create(department("Pediatrics")).await?;
    let orthopedics = registry.departments.create(department("Orthopedics")).await?;
    let general = registry
        .departments
        .create(department("General Medicine"))
        .await?;

    let chen = registry
        .doctors
        .create(doctor("Sarah", "Chen", "Cardiology", cardiology.id))
        .await?;
    let okafor = registry
        .doctors
        .create(doctor("James", "Okafor", "Pediatrics", pediatrics.id))
        .await?;
    let nair = registry
        .doctors
        .create(doctor("Priya", "Nair", "Orthopedic Surgery", orthopedics.id))
        .await?;
    let alvarez = registry
        .doctors
        .create(doctor("Miguel", "Alvarez", "Family Medicine", general.id))
        .await?;

    // Mon/Wed/Fri for Chen and Nair, Tue/Thu for Okafor, weekdays for Alvarez.
    let mut schedules = Vec::new();
    for (doc, days) in [
        (&chen, vec![1, 3, 5]),
        (&okafor, vec![2, 4]),
        (&nair, vec![1, 3, 5]),
        (&alvarez, vec![1, 2, 3, 4, 5]),
    ] {
        for day_of_week in days {
            schedules.push(Schedule {
                id: Uuid::new_v4(),
                doctor_id: doc.id,
                department_id: doc.department_id,
                day_of_week,
                start_time: workday_start,
                end_time: workday_end,
                valid_from: today - Duration::days(60),
                valid_to: None,
                status: ScheduleStatus::Active,
                created_at: Utc::now(),
            });
        }
    }

    // A retired schedule so historical listings have something to show.
    schedules.push(Schedule {
        id: Uuid::new_v4(),
        doctor_id: chen.id,
        department_id: chen.department_id,
        day_of_week: 2,
        start_time: workday_start,
        end_time: workday_end,
        valid_from: today - Duration::days(180),
        valid_to: Some(today - Duration::days(61)),
        status: ScheduleStatus::Inactive,
        created_at: Utc::now() - Duration::days(180),
    });

    let schedule_count = schedules.len();
    registry.schedules.create_many(schedules).await?;

    info!(
        "Seeded demo catalog: {} departments, {} doctors, {} schedules",
        registry.departments.count().await,
        registry.doctors.count().await,
        schedule_count
    );

    Ok(())
}

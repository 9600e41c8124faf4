//! Shared test utilities for `DriveBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        finance::{self, NewExpense, NewPayment},
        instructor::{self, NewInstructor},
        lesson::{self, LessonKind, NewLesson},
        student::{self, NewStudent},
        vehicle::{self, NewVehicle},
    },
    entities::{self, ExpenseCategory, LessonStatus, LicenseType, StudentStatus, VehicleStatus},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap_or_default()
}

/// Student fields with sensible defaults.
///
/// # Defaults
/// * licence B, status open, training cost 3500
/// * national id derived from the name
/// * registered 2024-07-01
pub fn test_new_student(name: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        address: "Rabat".to_string(),
        phone: "0612345678".to_string(),
        national_id: format!("ID-{name}"),
        license_type: LicenseType::B,
        status: StudentStatus::Open,
        total_training_cost: 3500.0,
        registration_date: Some(day(2024, 7, 1)),
    }
}

/// Registers a student built by [`test_new_student`].
pub async fn create_test_student(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::student::Model> {
    student::create_student(db, test_new_student(name)).await
}

/// Vehicle fields with sensible defaults: an available car bought in 2021.
pub fn test_new_vehicle(brand: &str) -> NewVehicle {
    NewVehicle {
        vehicle_type: "car".to_string(),
        brand: brand.to_string(),
        registration: format!("REG-{brand}"),
        purchase_year: 2021,
        status: VehicleStatus::Available,
        last_maintenance: day(2024, 6, 1),
    }
}

/// Inserts an available vehicle with the given plate.
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    brand: &str,
) -> Result<entities::vehicle::Model> {
    vehicle::create_vehicle(db, test_new_vehicle(brand)).await
}

/// Hires an instructor on 2020-05-10.
pub async fn create_test_instructor(
    db: &DatabaseConnection,
    name: &str,
    assigned_vehicle_id: Option<i64>,
) -> Result<entities::instructor::Model> {
    instructor::create_instructor(
        db,
        NewInstructor {
            name: name.to_string(),
            phone: "0611223344".to_string(),
            hire_date: day(2020, 5, 10),
            assigned_vehicle_id,
        },
    )
    .await
}

/// Schedules a lesson. `date` is `YYYY-MM-DD`.
pub async fn create_test_lesson(
    db: &DatabaseConnection,
    kind: LessonKind,
    date: &str,
    time: &str,
) -> Result<entities::lesson::Model> {
    lesson::create_lesson(
        db,
        NewLesson {
            kind,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default(),
            time: time.to_string(),
            status: LessonStatus::Scheduled,
        },
    )
    .await
}

/// Records a payment dated 2024-07-01.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    student_id: i64,
    amount: f64,
) -> Result<entities::payment::Model> {
    finance::create_payment(
        db,
        NewPayment {
            student_id,
            amount,
            date: day(2024, 7, 1),
            description: "Registration".to_string(),
        },
    )
    .await
}

/// Records a maintenance expense dated 2024-07-01.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    amount: f64,
) -> Result<entities::expense::Model> {
    finance::create_expense(
        db,
        NewExpense {
            category: ExpenseCategory::Maintenance,
            amount,
            date: day(2024, 7, 1),
            description: "Oil change".to_string(),
        },
    )
    .await
}

//! Sample data compiled into the binary from `seed.toml`
//!
//! The records deserialize straight into the entity models, ids included, so the
//! references between them survive loading unchanged.

use crate::entities::{
    ExpenseModel, InstructorModel, LessonModel, PaymentModel, StudentDocumentModel, StudentModel,
    VehicleModel,
};
use crate::errors::{Error, Result};
use serde::Deserialize;

const SEED_TOML: &str = include_str!("seed.toml");

/// Every sample collection
#[derive(Debug, Deserialize, Default)]
pub struct SeedData {
    /// Students, with their ids
    #[serde(default)]
    pub students: Vec<StudentModel>,
    /// Documents attached to the students above
    #[serde(default)]
    pub documents: Vec<StudentDocumentModel>,
    /// Instructors
    #[serde(default)]
    pub instructors: Vec<InstructorModel>,
    /// Vehicles
    #[serde(default)]
    pub vehicles: Vec<VehicleModel>,
    /// Practical and theoretical lessons
    #[serde(default)]
    pub lessons: Vec<LessonModel>,
    /// Payments, each pointing at a seeded student
    #[serde(default)]
    pub payments: Vec<PaymentModel>,
    /// Expenses
    #[serde(default)]
    pub expenses: Vec<ExpenseModel>,
}

/// Parses seed data from TOML text.
pub fn parse_seed(contents: &str) -> Result<SeedData> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed data: {e}"),
    })
}

/// Parses the embedded sample data.
pub fn load_seed() -> Result<SeedData> {
    parse_seed(SEED_TOML)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{LessonType, StudentStatus};

    #[test]
    fn test_embedded_seed_parses() {
        let seed = load_seed().unwrap();
        assert_eq!(seed.students.len(), 5);
        assert_eq!(seed.documents.len(), 2);
        assert_eq!(seed.instructors.len(), 4);
        assert_eq!(seed.vehicles.len(), 5);
        assert_eq!(seed.lessons.len(), 3);
        assert_eq!(seed.payments.len(), 4);
        assert_eq!(seed.expenses.len(), 4);

        assert_eq!(seed.students[0].status, StudentStatus::Successful);
        assert_eq!(seed.lessons[2].lesson_type, LessonType::Theoretical);
        assert_eq!(seed.lessons[2].student_id, None);
        assert_eq!(seed.lessons[0].topic, None);
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let toml_str = r#"
            [[expenses]]
            id = 1
            category = "rent"
            amount = 10.0
            date = "2024-01-01"
            description = ""
        "#;
        let seed = parse_seed(toml_str).unwrap();
        assert!(seed.students.is_empty());
        assert_eq!(seed.expenses[0].amount, 10.0);
    }

    #[test]
    fn test_unknown_status_is_config_error() {
        let toml_str = r#"
            [[vehicles]]
            id = 1
            vehicle_type = "car"
            brand = "Renault Clio"
            registration = "123-A-45"
            purchase_year = 2020
            status = "broken"
            last_maintenance = "2024-01-01"
        "#;
        let result = parse_seed(toml_str);
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}

//! Lesson entity - One hour in the weekly schedule.
//!
//! A lesson is either practical (a student driving with an instructor in a vehicle) or
//! theoretical (a topic taught in a room). Both shapes share one table: the columns of
//! the variant not in use are NULL, and `lesson_type` says which ones are meaningful.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Discriminant of the lesson variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    /// Driving lesson with a student, an instructor and a vehicle
    #[sea_orm(string_value = "practical")]
    Practical,
    /// Classroom lesson with a topic and a location
    #[sea_orm(string_value = "theoretical")]
    Theoretical,
}

impl LessonType {
    /// Translation key for the type label
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Practical => "lesson_type_practical",
            Self::Theoretical => "lesson_type_theoretical",
        }
    }
}

/// Progress of a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    /// Planned, not yet held
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    /// Held
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Called off
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl LessonStatus {
    /// Translation key for the status label
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Scheduled => "lesson_status_scheduled",
            Self::Completed => "lesson_status_completed",
            Self::Cancelled => "lesson_status_cancelled",
        }
    }
}

/// Lesson database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Decides which of the optional fields below are set
    pub lesson_type: LessonType,
    /// Day of the lesson
    pub date: Date,
    /// Slot label, `HH:MM`
    pub time: String,
    /// Scheduled, completed or cancelled
    pub status: LessonStatus,
    /// Practical only
    pub student_id: Option<i64>,
    /// Practical only
    pub instructor_id: Option<i64>,
    /// Practical only
    pub vehicle_id: Option<i64>,
    /// Theoretical only
    pub topic: Option<String>,
    /// Theoretical only
    pub location: Option<String>,
}

/// Lessons reference students, instructors and vehicles by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

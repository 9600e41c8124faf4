//! Student entity - A candidate enrolled for a driving license.
//!
//! The training cost is the full price agreed at registration; what the student still
//! owes is derived from payments, never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// License category the student trains for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum LicenseType {
    /// Motorcycles
    #[sea_orm(string_value = "A")]
    A,
    /// Passenger cars
    #[sea_orm(string_value = "B")]
    B,
    /// Trucks
    #[sea_orm(string_value = "C")]
    C,
    /// Buses
    #[sea_orm(string_value = "D")]
    D,
    /// Heavy trailers
    #[sea_orm(string_value = "E")]
    E,
}

impl LicenseType {
    /// Single-letter code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

/// Where the student stands in the licensing process. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "kebab-case")]
pub enum StudentStatus {
    /// File opened, training not started
    #[sea_orm(string_value = "open")]
    Open,
    /// Taking lessons
    #[sea_orm(string_value = "in-training")]
    InTraining,
    /// Sat the exam, result pending
    #[sea_orm(string_value = "passed-exam")]
    PassedExam,
    /// License obtained
    #[sea_orm(string_value = "successful")]
    Successful,
    /// Failed the exam
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl StudentStatus {
    /// Translation key for the status label
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Open => "status_open_file",
            Self::InTraining => "status_in_training",
            Self::PassedExam => "status_passed_exam",
            Self::Successful => "status_successful",
            Self::Failed => "status_failed",
        }
    }
}

/// Student database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Assigned as `max(id) + 1` on creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Postal address
    pub address: String,
    /// Phone number
    pub phone: String,
    /// National identity card number
    pub national_id: String,
    /// License category
    pub license_type: LicenseType,
    /// Current training status
    pub status: StudentStatus,
    /// Day the file was opened
    pub registration_date: Date,
    /// Agreed price of the whole training
    pub total_training_cost: f64,
}

/// A student owns its documents; payments and lessons only reference it by id.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One student has many documents
    #[sea_orm(has_many = "super::student_document::Entity")]
    Documents,
}

impl Related<super::student_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

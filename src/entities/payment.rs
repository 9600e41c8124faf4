//! Payment entity - Money received from a student.
//!
//! `student_id` is deliberately not a foreign key: deleting a student keeps the
//! payment, and listings fall back to a "deleted student" label.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Student who paid
    pub student_id: i64,
    /// Amount received
    pub amount: f64,
    /// Day of the payment
    pub date: Date,
    /// What the payment covers
    pub description: String,
}

/// Payments keep their student id even after the student is deleted
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Instructor entity - A driving instructor employed by the school.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Instructor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructors")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Phone number
    pub phone: String,
    /// Day the instructor joined
    pub hire_date: Date,
    /// Vehicle usually driven by this instructor. Not checked against the vehicle
    /// collection, so it may name a vehicle that no longer exists.
    pub assigned_vehicle_id: Option<i64>,
}

/// Instructors reference vehicles by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

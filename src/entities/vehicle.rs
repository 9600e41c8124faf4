//! Vehicle entity - A car, truck or bus in the school's fleet.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Availability of a vehicle for lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    /// Can be used for lessons
    #[sea_orm(string_value = "available")]
    Available,
    /// Temporarily at the garage
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    /// Withdrawn from the fleet
    #[sea_orm(string_value = "out-of-service")]
    OutOfService,
}

impl VehicleStatus {
    /// Translation key for the status label
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Available => "vehicle_status_available",
            Self::Maintenance => "vehicle_status_maintenance",
            Self::OutOfService => "vehicle_status_out_of_service",
        }
    }
}

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Free-form kind, e.g. car, truck, bus
    pub vehicle_type: String,
    /// Make and model, e.g. "Dacia Logan"
    pub brand: String,
    /// License plate
    pub registration: String,
    /// Year the school bought it
    pub purchase_year: i32,
    /// Whether the vehicle can be booked
    pub status: VehicleStatus,
    /// Date of the last maintenance
    pub last_maintenance: Date,
}

/// Vehicles have no stored relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Vehicle business logic - Handles the school's fleet.

use crate::{
    core::{ids::next_id, validate},
    entities::{Vehicle, VehicleColumn, VehicleStatus, vehicle},
    errors::{Error, Result},
    i18n::Language,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields required to add a vehicle.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    /// Free text such as car, truck or bus
    pub vehicle_type: String,
    /// Make and model
    pub brand: String,
    /// License plate
    pub registration: String,
    /// Year of purchase
    pub purchase_year: i32,
    /// Current status
    pub status: VehicleStatus,
    /// Date of the last maintenance
    pub last_maintenance: NaiveDate,
}

/// Fields an edit may change. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    /// Kind of vehicle
    pub vehicle_type: Option<String>,
    /// Make and model
    pub brand: Option<String>,
    /// License plate
    pub registration: Option<String>,
    /// Year of purchase
    pub purchase_year: Option<i32>,
    /// Current status
    pub status: Option<VehicleStatus>,
    /// Date of the last maintenance
    pub last_maintenance: Option<NaiveDate>,
}

impl VehicleChanges {
    /// True when the edit would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vehicle_type.is_none()
            && self.brand.is_none()
            && self.registration.is_none()
            && self.purchase_year.is_none()
            && self.status.is_none()
            && self.last_maintenance.is_none()
    }
}

/// Retrieves every vehicle in creation order.
pub async fn get_all_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicle::Model>> {
    Vehicle::find()
        .order_by_asc(VehicleColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a vehicle by id.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a vehicle to the fleet with the next free id.
pub async fn create_vehicle(db: &DatabaseConnection, new: NewVehicle) -> Result<vehicle::Model> {
    let vehicle_type = validate::required("Vehicle type", &new.vehicle_type)?;
    let brand = validate::required("Brand", &new.brand)?;
    let registration = validate::required("Registration", &new.registration)?;
    let purchase_year = validate::year(new.purchase_year)?;

    let id = next_id::<Vehicle, _>(db, VehicleColumn::Id).await?;
    let vehicle = vehicle::ActiveModel {
        id: Set(id),
        vehicle_type: Set(vehicle_type),
        brand: Set(brand),
        registration: Set(registration),
        purchase_year: Set(purchase_year),
        status: Set(new.status),
        last_maintenance: Set(new.last_maintenance),
    };

    let result = vehicle.insert(db).await?;
    info!("Created vehicle #{} ({})", result.id, result.registration);
    Ok(result)
}

/// Applies the fields present in `changes`.
pub async fn update_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
    changes: VehicleChanges,
) -> Result<vehicle::Model> {
    let existing = get_vehicle_by_id(db, vehicle_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "vehicle",
            id: vehicle_id,
        })?;

    if changes.is_empty() {
        return Ok(existing);
    }

    let mut active_model: vehicle::ActiveModel = existing.into();
    if let Some(vehicle_type) = changes.vehicle_type {
        active_model.vehicle_type = Set(validate::required("Vehicle type", &vehicle_type)?);
    }
    if let Some(brand) = changes.brand {
        active_model.brand = Set(validate::required("Brand", &brand)?);
    }
    if let Some(registration) = changes.registration {
        active_model.registration = Set(validate::required("Registration", &registration)?);
    }
    if let Some(year) = changes.purchase_year {
        active_model.purchase_year = Set(validate::year(year)?);
    }
    if let Some(status) = changes.status {
        active_model.status = Set(status);
    }
    if let Some(date) = changes.last_maintenance {
        active_model.last_maintenance = Set(date);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a vehicle. Instructors and lessons that reference it keep the stale id.
pub async fn delete_vehicle(db: &DatabaseConnection, vehicle_id: i64) -> Result<vehicle::Model> {
    let existing = get_vehicle_by_id(db, vehicle_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "vehicle",
            id: vehicle_id,
        })?;

    Vehicle::delete_by_id(vehicle_id).exec(db).await?;
    info!("Deleted vehicle #{vehicle_id}");
    Ok(existing)
}

/// Short human label, e.g. `Dacia Logan (678-B-90)`.
#[must_use]
pub fn vehicle_label(vehicle: &vehicle::Model) -> String {
    format!("{} ({})", vehicle.brand, vehicle.registration)
}

/// Label for a possibly dangling vehicle reference.
///
/// Existing vehicles render with [`vehicle_label`], a stale id renders as
/// "vehicle #id", and no id at all renders as "unassigned".
#[must_use]
pub fn assigned_vehicle_label(
    vehicle_id: Option<i64>,
    vehicles: &[vehicle::Model],
    lang: Language,
) -> String {
    match vehicle_id {
        None => lang.t("unassigned").to_string(),
        Some(id) => vehicles.iter().find(|v| v.id == id).map_or_else(
            || format!("{} {id}", lang.t("vehicle_no")),
            vehicle_label,
        ),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_list_in_order() -> Result<()> {
        let db = setup_test_db().await?;
        let clio = create_test_vehicle(&db, "Renault Clio").await?;
        let logan = create_test_vehicle(&db, "Dacia Logan").await?;

        let all = get_all_vehicles(&db).await?;
        assert_eq!(all, vec![clio, logan]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_empty_registration() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new = test_new_vehicle("Peugeot 208");
        new.registration = String::new();
        assert!(matches!(
            create_vehicle(&db, new).await,
            Err(Error::Validation { message: _ })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_only() -> Result<()> {
        let db = setup_test_db().await?;
        let vehicle = create_test_vehicle(&db, "Peugeot 208").await?;

        let updated = update_vehicle(
            &db,
            vehicle.id,
            VehicleChanges {
                status: Some(VehicleStatus::Maintenance),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.status, VehicleStatus::Maintenance);
        assert_eq!(updated.brand, vehicle.brand);
        assert_eq!(updated.registration, vehicle.registration);
        assert_eq!(updated.purchase_year, vehicle.purchase_year);
        assert_eq!(updated.last_maintenance, vehicle.last_maintenance);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_vehicle() -> Result<()> {
        let db = setup_test_db().await?;
        let vehicle = create_test_vehicle(&db, "Volvo FH").await?;
        delete_vehicle(&db, vehicle.id).await?;
        assert!(get_vehicle_by_id(&db, vehicle.id).await?.is_none());
        assert!(matches!(
            delete_vehicle(&db, vehicle.id).await,
            Err(Error::NotFound { entity: "vehicle", id: _ })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_assigned_vehicle_label_fallbacks() -> Result<()> {
        let db = setup_test_db().await?;
        let vehicle = create_test_vehicle(&db, "Dacia Logan").await?;
        let vehicles = get_all_vehicles(&db).await?;

        let lang = Language::French;
        assert_eq!(
            assigned_vehicle_label(Some(vehicle.id), &vehicles, lang),
            vehicle_label(&vehicle)
        );
        assert_eq!(assigned_vehicle_label(Some(99), &vehicles, lang), "Véhicule n° 99");
        assert_eq!(assigned_vehicle_label(None, &vehicles, lang), "Non attribué");
        Ok(())
    }
}

//! Instructor business logic - Handles the school's driving instructors.

use crate::{
    core::{ids::next_id, validate},
    entities::{Instructor, InstructorColumn, instructor},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// Fields required to hire an instructor.
#[derive(Debug, Clone)]
pub struct NewInstructor {
    /// Full name
    pub name: String,
    /// Phone number
    pub phone: String,
    /// Date the instructor joined the school
    pub hire_date: NaiveDate,
    /// Vehicle the instructor usually drives
    pub assigned_vehicle_id: Option<i64>,
}

/// Fields an edit may change.
///
/// `assigned_vehicle_id` is doubly optional: `None` keeps the current assignment,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct InstructorChanges {
    /// Full name
    pub name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Date the instructor joined the school
    pub hire_date: Option<NaiveDate>,
    /// `Some(None)` clears the assignment
    pub assigned_vehicle_id: Option<Option<i64>>,
}

impl InstructorChanges {
    /// True when the edit would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.hire_date.is_none()
            && self.assigned_vehicle_id.is_none()
    }
}

/// Retrieves every instructor in creation order.
pub async fn get_all_instructors(db: &DatabaseConnection) -> Result<Vec<instructor::Model>> {
    Instructor::find()
        .order_by_asc(InstructorColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an instructor by id.
pub async fn get_instructor_by_id(
    db: &DatabaseConnection,
    instructor_id: i64,
) -> Result<Option<instructor::Model>> {
    Instructor::find_by_id(instructor_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Maps instructor ids to names for labelling joins.
pub async fn instructor_names(db: &DatabaseConnection) -> Result<HashMap<i64, String>> {
    Ok(get_all_instructors(db)
        .await?
        .into_iter()
        .map(|i| (i.id, i.name))
        .collect())
}

/// Hires an instructor with the next free id. The assigned vehicle is not checked.
pub async fn create_instructor(
    db: &DatabaseConnection,
    new: NewInstructor,
) -> Result<instructor::Model> {
    let name = validate::required("Instructor name", &new.name)?;
    let phone = validate::required("Phone", &new.phone)?;

    let id = next_id::<Instructor, _>(db, InstructorColumn::Id).await?;
    let instructor = instructor::ActiveModel {
        id: Set(id),
        name: Set(name),
        phone: Set(phone),
        hire_date: Set(new.hire_date),
        assigned_vehicle_id: Set(new.assigned_vehicle_id),
    };

    let result = instructor.insert(db).await?;
    info!("Created instructor #{} ({})", result.id, result.name);
    Ok(result)
}

/// Applies the fields present in `changes`.
pub async fn update_instructor(
    db: &DatabaseConnection,
    instructor_id: i64,
    changes: InstructorChanges,
) -> Result<instructor::Model> {
    let existing = get_instructor_by_id(db, instructor_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "instructor",
            id: instructor_id,
        })?;

    if changes.is_empty() {
        return Ok(existing);
    }

    let mut active_model: instructor::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        active_model.name = Set(validate::required("Instructor name", &name)?);
    }
    if let Some(phone) = changes.phone {
        active_model.phone = Set(validate::required("Phone", &phone)?);
    }
    if let Some(hire_date) = changes.hire_date {
        active_model.hire_date = Set(hire_date);
    }
    if let Some(vehicle_id) = changes.assigned_vehicle_id {
        active_model.assigned_vehicle_id = Set(vehicle_id);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an instructor. Lessons naming the instructor keep the stale id.
pub async fn delete_instructor(
    db: &DatabaseConnection,
    instructor_id: i64,
) -> Result<instructor::Model> {
    let existing = get_instructor_by_id(db, instructor_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "instructor",
            id: instructor_id,
        })?;

    Instructor::delete_by_id(instructor_id).exec(db).await?;
    info!("Deleted instructor #{instructor_id}");
    Ok(existing)
}

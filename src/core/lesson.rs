//! Lesson business logic - Handles the practical/theoretical lesson variants.
//!
//! Input goes through [`LessonKind`], a tagged variant: practical lessons carry a
//! student, an instructor and a vehicle, theoretical lessons a topic and a location.
//! Saving writes the chosen variant's columns and clears the other variant's, so a row
//! never holds stale fields from a previous type.

use crate::{
    core::{ids::next_id, schedule::TIME_SLOTS, validate},
    entities::{Lesson, LessonColumn, LessonStatus, LessonType, lesson},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// The variant-specific part of a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonKind {
    /// A student driving with an instructor
    Practical {
        /// Student at the wheel
        student_id: i64,
        /// Supervising instructor
        instructor_id: i64,
        /// Vehicle used
        vehicle_id: i64,
    },
    /// A classroom session
    Theoretical {
        /// Subject taught, e.g. road signs
        topic: String,
        /// Room or address of the session
        location: String,
    },
}

/// Raw variant fields as typed into a form; only the chosen variant's are used.
#[derive(Debug, Clone, Default)]
pub struct KindFields {
    /// Student driving the lesson
    pub student_id: Option<i64>,
    /// Instructor supervising the lesson
    pub instructor_id: Option<i64>,
    /// Vehicle used
    pub vehicle_id: Option<i64>,
    /// Theoretical lessons only
    pub topic: Option<String>,
    /// Theoretical lessons only
    pub location: Option<String>,
}

impl KindFields {
    /// True when no variant field was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.student_id.is_none()
            && self.instructor_id.is_none()
            && self.vehicle_id.is_none()
            && self.topic.is_none()
            && self.location.is_none()
    }
}

impl LessonKind {
    /// Builds the variant selected by `lesson_type`, requiring its fields and dropping
    /// the fields of the other variant.
    pub fn from_fields(lesson_type: LessonType, fields: KindFields) -> Result<Self> {
        match lesson_type {
            LessonType::Practical => {
                let (Some(student_id), Some(instructor_id), Some(vehicle_id)) =
                    (fields.student_id, fields.instructor_id, fields.vehicle_id)
                else {
                    return Err(Error::validation(
                        "A practical lesson needs a student, an instructor and a vehicle",
                    ));
                };
                Ok(Self::Practical {
                    student_id,
                    instructor_id,
                    vehicle_id,
                })
            }
            LessonType::Theoretical => {
                let topic = validate::required("Topic", fields.topic.as_deref().unwrap_or(""))?;
                let location =
                    validate::required("Location", fields.location.as_deref().unwrap_or(""))?;
                Ok(Self::Theoretical { topic, location })
            }
        }
    }

    /// Discriminant of this variant
    #[must_use]
    pub const fn lesson_type(&self) -> LessonType {
        match self {
            Self::Practical { .. } => LessonType::Practical,
            Self::Theoretical { .. } => LessonType::Theoretical,
        }
    }

    /// Writes the variant columns, clearing those of the other variant.
    fn apply(self, model: &mut lesson::ActiveModel) {
        model.lesson_type = Set(self.lesson_type());
        match self {
            Self::Practical {
                student_id,
                instructor_id,
                vehicle_id,
            } => {
                model.student_id = Set(Some(student_id));
                model.instructor_id = Set(Some(instructor_id));
                model.vehicle_id = Set(Some(vehicle_id));
                model.topic = Set(None);
                model.location = Set(None);
            }
            Self::Theoretical { topic, location } => {
                model.student_id = Set(None);
                model.instructor_id = Set(None);
                model.vehicle_id = Set(None);
                model.topic = Set(Some(topic));
                model.location = Set(Some(location));
            }
        }
    }
}

/// Fields required to schedule a lesson.
#[derive(Debug, Clone)]
pub struct NewLesson {
    /// Practical or theoretical, with the matching fields
    pub kind: LessonKind,
    /// Day of the lesson
    pub date: NaiveDate,
    /// Slot label such as `09:00`
    pub time: String,
    /// Current status
    pub status: LessonStatus,
}

/// Fields an edit may change. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default)]
pub struct LessonChanges {
    /// Replaces the kind and all of its fields
    pub kind: Option<LessonKind>,
    /// Day of the lesson
    pub date: Option<NaiveDate>,
    /// Slot label such as `09:00`
    pub time: Option<String>,
    /// Current status
    pub status: Option<LessonStatus>,
}

impl LessonChanges {
    /// True when the edit would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none() && self.date.is_none() && self.time.is_none() && self.status.is_none()
    }
}

/// Resolves the variant an edit asks for.
///
/// Returns `None` when neither a type nor any variant field was given. Missing fields
/// are taken from the stored lesson, which only helps when the type stays the same:
/// switching type requires the new variant's fields.
pub fn edited_kind(
    existing: &lesson::Model,
    lesson_type: Option<LessonType>,
    fields: KindFields,
) -> Result<Option<LessonKind>> {
    if lesson_type.is_none() && fields.is_empty() {
        return Ok(None);
    }

    let merged = KindFields {
        student_id: fields.student_id.or(existing.student_id),
        instructor_id: fields.instructor_id.or(existing.instructor_id),
        vehicle_id: fields.vehicle_id.or(existing.vehicle_id),
        topic: fields.topic.or_else(|| existing.topic.clone()),
        location: fields.location.or_else(|| existing.location.clone()),
    };

    LessonKind::from_fields(lesson_type.unwrap_or(existing.lesson_type), merged).map(Some)
}

/// Normalizes a slot label (`9:00` becomes `09:00`) and checks it is on the schedule.
pub fn parse_slot(time: &str) -> Result<String> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| Error::validation(format!("Invalid time '{time}', expected HH:MM")))?;
    let label = parsed.format("%H:%M").to_string();
    if !TIME_SLOTS.contains(&label.as_str()) {
        return Err(Error::validation(format!(
            "Time {label} is outside the schedule ({} to {})",
            TIME_SLOTS[0],
            TIME_SLOTS[TIME_SLOTS.len() - 1]
        )));
    }
    Ok(label)
}

/// Retrieves every lesson in creation order.
pub async fn get_all_lessons(db: &DatabaseConnection) -> Result<Vec<lesson::Model>> {
    Lesson::find()
        .order_by_asc(LessonColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a lesson by id.
pub async fn get_lesson_by_id(
    db: &DatabaseConnection,
    lesson_id: i64,
) -> Result<Option<lesson::Model>> {
    Lesson::find_by_id(lesson_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Schedules a lesson with the next free id. Referenced ids are not checked.
pub async fn create_lesson(db: &DatabaseConnection, new: NewLesson) -> Result<lesson::Model> {
    let time = parse_slot(&new.time)?;

    let id = next_id::<Lesson, _>(db, LessonColumn::Id).await?;
    let mut lesson = lesson::ActiveModel {
        id: Set(id),
        date: Set(new.date),
        time: Set(time),
        status: Set(new.status),
        ..Default::default()
    };
    new.kind.apply(&mut lesson);

    let result = lesson.insert(db).await?;
    info!(
        "Created {:?} lesson #{} on {} at {}",
        result.lesson_type, result.id, result.date, result.time
    );
    Ok(result)
}

/// Applies the fields present in `changes`.
pub async fn update_lesson(
    db: &DatabaseConnection,
    lesson_id: i64,
    changes: LessonChanges,
) -> Result<lesson::Model> {
    let existing = get_lesson_by_id(db, lesson_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "lesson",
            id: lesson_id,
        })?;

    if changes.is_empty() {
        return Ok(existing);
    }

    let mut active_model: lesson::ActiveModel = existing.into();
    if let Some(kind) = changes.kind {
        kind.apply(&mut active_model);
    }
    if let Some(date) = changes.date {
        active_model.date = Set(date);
    }
    if let Some(time) = changes.time {
        active_model.time = Set(parse_slot(&time)?);
    }
    if let Some(status) = changes.status {
        active_model.status = Set(status);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a lesson and returns it.
pub async fn delete_lesson(db: &DatabaseConnection, lesson_id: i64) -> Result<lesson::Model> {
    let existing = get_lesson_by_id(db, lesson_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "lesson",
            id: lesson_id,
        })?;

    Lesson::delete_by_id(lesson_id).exec(db).await?;
    info!("Deleted lesson #{lesson_id}");
    Ok(existing)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn practical() -> LessonKind {
        LessonKind::Practical {
            student_id: 2,
            instructor_id: 1,
            vehicle_id: 1,
        }
    }

    #[test]
    fn test_from_fields_drops_other_variant() {
        let fields = KindFields {
            student_id: Some(2),
            instructor_id: Some(1),
            vehicle_id: Some(1),
            topic: Some("Road signs".to_string()),
            location: None,
        };
        let kind = LessonKind::from_fields(LessonType::Practical, fields).unwrap();
        assert_eq!(kind, practical());
    }

    #[test]
    fn test_from_fields_requires_variant_fields() {
        let missing_vehicle = KindFields {
            student_id: Some(2),
            instructor_id: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            LessonKind::from_fields(LessonType::Practical, missing_vehicle),
            Err(Error::Validation { message: _ })
        ));

        let missing_location = KindFields {
            topic: Some("Traffic law".to_string()),
            ..Default::default()
        };
        assert!(LessonKind::from_fields(LessonType::Theoretical, missing_location).is_err());
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("9:00").unwrap(), "09:00");
        assert_eq!(parse_slot("18:00").unwrap(), "18:00");
        assert!(parse_slot("19:00").is_err());
        assert!(parse_slot("07:00").is_err());
        assert!(parse_slot("noon").is_err());
    }

    #[tokio::test]
    async fn test_create_practical_lesson() -> Result<()> {
        let db = setup_test_db().await?;
        let lesson = create_lesson(
            &db,
            NewLesson {
                kind: practical(),
                date: NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
                time: "09:00".to_string(),
                status: LessonStatus::Scheduled,
            },
        )
        .await?;

        assert_eq!(lesson.id, 1);
        assert_eq!(lesson.lesson_type, LessonType::Practical);
        assert_eq!(lesson.student_id, Some(2));
        assert_eq!(lesson.topic, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_switching_type_clears_previous_variant() -> Result<()> {
        let db = setup_test_db().await?;
        let lesson = create_test_lesson(&db, practical(), "2024-07-22", "10:00").await?;

        let kind = edited_kind(
            &lesson,
            Some(LessonType::Theoretical),
            KindFields {
                topic: Some("Traffic law".to_string()),
                location: Some("Room 1".to_string()),
                ..Default::default()
            },
        )?;
        let updated = update_lesson(
            &db,
            lesson.id,
            LessonChanges {
                kind,
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.lesson_type, LessonType::Theoretical);
        assert_eq!(updated.student_id, None);
        assert_eq!(updated.instructor_id, None);
        assert_eq!(updated.vehicle_id, None);
        assert_eq!(updated.topic.as_deref(), Some("Traffic law"));
        assert_eq!(updated.time, lesson.time);
        assert_eq!(updated.date, lesson.date);
        Ok(())
    }

    #[tokio::test]
    async fn test_switching_type_without_fields_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let lesson = create_test_lesson(&db, practical(), "2024-07-22", "10:00").await?;
        let result = edited_kind(&lesson, Some(LessonType::Theoretical), KindFields::default());
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_single_variant_field_keeps_the_rest() -> Result<()> {
        let db = setup_test_db().await?;
        let lesson = create_test_lesson(&db, practical(), "2024-07-22", "10:00").await?;

        let kind = edited_kind(
            &lesson,
            None,
            KindFields {
                vehicle_id: Some(4),
                ..Default::default()
            },
        )?;
        assert_eq!(
            kind,
            Some(LessonKind::Practical {
                student_id: 2,
                instructor_id: 1,
                vehicle_id: 4,
            })
        );
        assert_eq!(edited_kind(&lesson, None, KindFields::default())?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_only() -> Result<()> {
        let db = setup_test_db().await?;
        let lesson = create_test_lesson(&db, practical(), "2024-07-22", "10:00").await?;
        let updated = update_lesson(
            &db,
            lesson.id,
            LessonChanges {
                status: Some(LessonStatus::Completed),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.status, LessonStatus::Completed);
        assert_eq!(updated.student_id, lesson.student_id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_lesson() -> Result<()> {
        let db = setup_test_db().await?;
        let lesson = create_test_lesson(&db, practical(), "2024-07-22", "10:00").await?;
        delete_lesson(&db, lesson.id).await?;
        assert!(get_all_lessons(&db).await?.is_empty());
        Ok(())
    }
}

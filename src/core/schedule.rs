//! Weekly schedule grid - Projects lessons onto 7 days × 11 hourly slots.

use crate::{
    core::{instructor, lesson, student},
    entities::{LessonStatus, LessonType, lesson::Model as LessonModel},
    errors::Result,
};
use chrono::{Datelike, Days, NaiveDate};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// Hourly slot labels shown as grid rows.
pub const TIME_SLOTS: [&str; 11] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
    "18:00",
];

/// Number of day columns, Monday first.
pub const DAYS: usize = 7;

/// What a filled cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Names are `None` when the referenced record no longer exists.
    Practical {
        /// Student name, if the student still exists
        student: Option<String>,
        /// Instructor name, if the instructor still exists
        instructor: Option<String>,
    },
    /// Classroom session
    Theoretical {
        /// Subject of the session
        topic: Option<String>,
        /// Where it takes place
        location: Option<String>,
    },
}

/// One occupied cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCell {
    /// Lesson shown in the cell
    pub lesson_id: i64,
    /// Shown as a badge
    pub status: LessonStatus,
    /// What the cell displays
    pub content: CellContent,
}

/// Grid indexed by `[slot][day]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGrid {
    /// Monday of the displayed week, when restricted to one week
    pub week_start: Option<NaiveDate>,
    cells: [[Option<ScheduleCell>; DAYS]; TIME_SLOTS.len()],
}

impl ScheduleGrid {
    /// Lesson at `slot` on `day`, if any. Out-of-range positions are empty.
    #[must_use]
    pub fn cell(&self, slot: usize, day: usize) -> Option<&ScheduleCell> {
        self.cells.get(slot)?.get(day)?.as_ref()
    }

    /// Rows paired with their slot label.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &[Option<ScheduleCell>; DAYS])> {
        TIME_SLOTS.iter().copied().zip(self.cells.iter())
    }

    /// True when no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }
}

/// Monday and Sunday of the week containing `date`.
#[must_use]
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    (monday, sunday)
}

/// Builds the grid from lessons in collection order.
///
/// A lesson lands in the column of its date's weekday and the row whose label equals
/// its time. The first lesson claiming a cell keeps it. With `week_of`, lessons outside
/// that Monday..Sunday week are skipped.
#[must_use]
pub fn build_grid(
    lessons: &[LessonModel],
    students: &HashMap<i64, String>,
    instructors: &HashMap<i64, String>,
    week_of: Option<NaiveDate>,
) -> ScheduleGrid {
    let week = week_of.map(week_bounds);
    let mut cells: [[Option<ScheduleCell>; DAYS]; TIME_SLOTS.len()] =
        std::array::from_fn(|_| std::array::from_fn(|_| None));

    for lesson in lessons {
        if let Some((monday, sunday)) = week {
            if lesson.date < monday || lesson.date > sunday {
                continue;
            }
        }
        let Some(slot) = TIME_SLOTS.iter().position(|s| *s == lesson.time) else {
            continue;
        };
        let day = lesson.date.weekday().num_days_from_monday() as usize;

        let cell = &mut cells[slot][day];
        if cell.is_some() {
            continue;
        }

        let content = match lesson.lesson_type {
            LessonType::Practical => CellContent::Practical {
                student: lesson.student_id.and_then(|id| students.get(&id).cloned()),
                instructor: lesson
                    .instructor_id
                    .and_then(|id| instructors.get(&id).cloned()),
            },
            LessonType::Theoretical => CellContent::Theoretical {
                topic: lesson.topic.clone(),
                location: lesson.location.clone(),
            },
        };
        *cell = Some(ScheduleCell {
            lesson_id: lesson.id,
            status: lesson.status,
            content,
        });
    }

    ScheduleGrid {
        week_start: week.map(|(monday, _)| monday),
        cells,
    }
}

/// Builds the grid from the current lessons, students and instructors.
pub async fn weekly_schedule(
    db: &DatabaseConnection,
    week_of: Option<NaiveDate>,
) -> Result<ScheduleGrid> {
    let lessons = lesson::get_all_lessons(db).await?;
    let students = student::student_names(db).await?;
    let instructors = instructor::instructor_names(db).await?;
    Ok(build_grid(&lessons, &students, &instructors, week_of))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::lesson::LessonKind;
    use crate::test_utils::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn practical_lesson(id: i64, day: &str, time: &str) -> LessonModel {
        LessonModel {
            id,
            lesson_type: LessonType::Practical,
            date: date(day),
            time: time.to_string(),
            status: LessonStatus::Scheduled,
            student_id: Some(1),
            instructor_id: Some(1),
            vehicle_id: Some(1),
            topic: None,
            location: None,
        }
    }

    fn names(entries: &[(i64, &str)]) -> HashMap<i64, String> {
        entries.iter().map(|(id, n)| (*id, (*n).to_string())).collect()
    }

    #[test]
    fn test_monday_lesson_fills_single_cell() {
        // 2024-07-22 is a Monday
        let lessons = vec![practical_lesson(1, "2024-07-22", "09:00")];
        let grid = build_grid(
            &lessons,
            &names(&[(1, "Ahmed")]),
            &names(&[(1, "Karim")]),
            None,
        );

        let occupied: Vec<(usize, usize)> = (0..TIME_SLOTS.len())
            .flat_map(|slot| (0..DAYS).map(move |day| (slot, day)))
            .filter(|(slot, day)| grid.cell(*slot, *day).is_some())
            .collect();
        assert_eq!(occupied, vec![(1, 0)]);
        assert_eq!(
            grid.cell(1, 0).unwrap().content,
            CellContent::Practical {
                student: Some("Ahmed".to_string()),
                instructor: Some("Karim".to_string()),
            }
        );
    }

    #[test]
    fn test_every_position_holds_only_its_lesson() {
        let monday = date("2024-07-22");
        for day in 0..DAYS {
            let day_date = monday.checked_add_days(Days::new(day as u64)).unwrap();
            for (slot, label) in TIME_SLOTS.iter().enumerate() {
                let lesson = practical_lesson(1, &day_date.to_string(), label);
                let grid = build_grid(&[lesson], &HashMap::new(), &HashMap::new(), None);

                let occupied: Vec<(usize, usize)> = (0..TIME_SLOTS.len())
                    .flat_map(|s| (0..DAYS).map(move |d| (s, d)))
                    .filter(|(s, d)| grid.cell(*s, *d).is_some())
                    .collect();
                assert_eq!(occupied, vec![(slot, day)], "lesson on {day_date} at {label}");
            }
        }
    }

    #[test]
    fn test_first_lesson_wins_cell() {
        // Same weekday and time, different weeks
        let lessons = vec![
            practical_lesson(1, "2024-07-22", "10:00"),
            practical_lesson(2, "2024-07-29", "10:00"),
        ];
        let grid = build_grid(&lessons, &HashMap::new(), &HashMap::new(), None);
        assert_eq!(grid.cell(2, 0).unwrap().lesson_id, 1);
    }

    #[test]
    fn test_out_of_slot_lesson_is_hidden() {
        let lessons = vec![practical_lesson(1, "2024-07-22", "19:00")];
        let grid = build_grid(&lessons, &HashMap::new(), &HashMap::new(), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_missing_names_render_empty() {
        let lessons = vec![practical_lesson(1, "2024-07-28", "18:00")];
        let grid = build_grid(&lessons, &HashMap::new(), &HashMap::new(), None);
        // Sunday, last slot
        assert_eq!(
            grid.cell(10, 6).unwrap().content,
            CellContent::Practical {
                student: None,
                instructor: None,
            }
        );
    }

    #[test]
    fn test_week_filter() {
        let lessons = vec![
            practical_lesson(1, "2024-07-22", "10:00"),
            practical_lesson(2, "2024-07-29", "10:00"),
        ];
        let grid = build_grid(
            &lessons,
            &HashMap::new(),
            &HashMap::new(),
            Some(date("2024-08-01")),
        );
        assert_eq!(grid.week_start, Some(date("2024-07-29")));
        assert_eq!(grid.cell(2, 0).unwrap().lesson_id, 2);
    }

    #[test]
    fn test_week_bounds() {
        assert_eq!(
            week_bounds(date("2024-07-24")),
            (date("2024-07-22"), date("2024-07-28"))
        );
        assert_eq!(
            week_bounds(date("2024-07-22")),
            (date("2024-07-22"), date("2024-07-28"))
        );
    }

    #[tokio::test]
    async fn test_weekly_schedule_theoretical_cell() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_lesson(
            &db,
            LessonKind::Theoretical {
                topic: "Traffic law".to_string(),
                location: "Room 1".to_string(),
            },
            "2024-07-23",
            "18:00",
        )
        .await?;

        let grid = weekly_schedule(&db, None).await?;
        assert_eq!(
            grid.cell(10, 1).unwrap().content,
            CellContent::Theoretical {
                topic: Some("Traffic law".to_string()),
                location: Some("Room 1".to_string()),
            }
        );
        Ok(())
    }
}

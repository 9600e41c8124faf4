//! Autocomplete handlers for Discord slash command parameters.
//!
//! Record parameters are typed as strings and suggest `#id name` labels while the user
//! types; the submitted value is the bare id, read back with
//! [`parse_id`](crate::bot::format::parse_id).

use crate::{
    bot::BotData,
    core::{finance, instructor, lesson, schedule::TIME_SLOTS, student, vehicle},
    errors::Error,
    i18n::Language,
};
use poise::serenity_prelude::AutocompleteChoice;
use tracing::error;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;

/// Keeps the `(id, label)` pairs whose label contains `partial` or whose id starts
/// with it, formatted as `#id label`.
fn matching(entries: impl IntoIterator<Item = (i64, String)>, partial: &str) -> Vec<(i64, String)> {
    let partial_lower = partial.trim().to_lowercase();
    entries
        .into_iter()
        .filter(|(id, label)| {
            partial_lower.is_empty()
                || label.to_lowercase().contains(&partial_lower)
                || id.to_string().starts_with(&partial_lower)
        })
        .take(MAX_CHOICES)
        .map(|(id, label)| (id, format!("#{id} {label}")))
        .collect()
}

fn matching_choices(
    entries: impl IntoIterator<Item = (i64, String)>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    matching(entries, partial)
        .into_iter()
        .map(|(id, name)| AutocompleteChoice::new(name, id.to_string()))
        .collect()
}

async fn reply_language(ctx: poise::Context<'_, BotData, Error>) -> Language {
    ctx.data().language().await.unwrap_or_default()
}

/// Suggests students by name or national id.
pub async fn autocomplete_student(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let db = &ctx.data().database;
    match student::get_all_students(db).await {
        Ok(students) => matching_choices(
            students
                .into_iter()
                .map(|s| (s.id, format!("{} ({})", s.name, s.national_id))),
            partial,
        ),
        Err(e) => {
            error!("Autocomplete: failed to fetch students: {:?}", e);
            Vec::new()
        }
    }
}

/// Suggests instructors by name.
pub async fn autocomplete_instructor(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let db = &ctx.data().database;
    match instructor::get_all_instructors(db).await {
        Ok(instructors) => {
            matching_choices(instructors.into_iter().map(|i| (i.id, i.name)), partial)
        }
        Err(e) => {
            error!("Autocomplete: failed to fetch instructors: {:?}", e);
            Vec::new()
        }
    }
}

/// Suggests vehicles by brand and plate.
pub async fn autocomplete_vehicle(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let db = &ctx.data().database;
    match vehicle::get_all_vehicles(db).await {
        Ok(vehicles) => matching_choices(
            vehicles
                .iter()
                .map(|v| (v.id, vehicle::vehicle_label(v))),
            partial,
        ),
        Err(e) => {
            error!("Autocomplete: failed to fetch vehicles: {:?}", e);
            Vec::new()
        }
    }
}

/// Suggests lessons as `date time type`.
pub async fn autocomplete_lesson(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let lang = reply_language(ctx).await;
    let db = &ctx.data().database;
    match lesson::get_all_lessons(db).await {
        Ok(lessons) => matching_choices(
            lessons.into_iter().map(|l| {
                (
                    l.id,
                    format!("{} {} {}", l.date, l.time, lang.t(l.lesson_type.label_key())),
                )
            }),
            partial,
        ),
        Err(e) => {
            error!("Autocomplete: failed to fetch lessons: {:?}", e);
            Vec::new()
        }
    }
}

/// Suggests payments labelled with the payer and amount.
pub async fn autocomplete_payment(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let lang = reply_language(ctx).await;
    let db = &ctx.data().database;
    match finance::payment_rows(db, lang).await {
        Ok(rows) => matching_choices(
            rows.into_iter().map(|row| {
                (
                    row.payment.id,
                    format!(
                        "{} · {} · {}",
                        row.student_name,
                        lang.format_money(row.payment.amount),
                        row.payment.date
                    ),
                )
            }),
            partial,
        ),
        Err(e) => {
            error!("Autocomplete: failed to fetch payments: {:?}", e);
            Vec::new()
        }
    }
}

/// Suggests expenses by description.
pub async fn autocomplete_expense(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let lang = reply_language(ctx).await;
    let db = &ctx.data().database;
    match finance::get_all_expenses(db).await {
        Ok(expenses) => matching_choices(
            expenses.into_iter().map(|e| {
                (
                    e.id,
                    format!(
                        "{} · {} · {}",
                        lang.t(e.category.label_key()),
                        lang.format_money(e.amount),
                        e.date
                    ),
                )
            }),
            partial,
        ),
        Err(e) => {
            error!("Autocomplete: failed to fetch expenses: {:?}", e);
            Vec::new()
        }
    }
}

/// Suggests the schedule's time slots.
pub async fn autocomplete_slot(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    TIME_SLOTS
        .iter()
        .filter(|slot| slot.starts_with(partial.trim()))
        .map(|slot| AutocompleteChoice::new(*slot, *slot))
        .collect()
}

/// Suggests the documents of every student as `student: document`.
pub async fn autocomplete_document(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let db = &ctx.data().database;
    let students = match student::get_all_students(db).await {
        Ok(students) => students,
        Err(e) => {
            error!("Autocomplete: failed to fetch students: {:?}", e);
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for s in students {
        match student::get_documents_for_student(db, s.id).await {
            Ok(docs) => {
                entries.extend(docs.into_iter().map(|d| (d.id, format!("{}: {}", s.name, d.name))));
            }
            Err(e) => error!("Autocomplete: failed to fetch documents: {:?}", e),
        }
    }
    matching_choices(entries, partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<(i64, String)> {
        vec![
            (1, "Ahmed Alaoui".to_string()),
            (2, "Fatima Zahra".to_string()),
            (12, "Youssef Bennani".to_string()),
        ]
    }

    #[test]
    fn test_matching_by_name_case_insensitive() {
        let found = matching(entries(), "fAt");
        assert_eq!(found, vec![(2, "#2 Fatima Zahra".to_string())]);
    }

    #[test]
    fn test_matching_by_id_prefix() {
        let ids: Vec<i64> = matching(entries(), "1").into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 12]);
    }

    #[test]
    fn test_empty_partial_lists_everything_up_to_limit() {
        let many = (1..=40).map(|i| (i, format!("Student {i}")));
        assert_eq!(matching(many, "").len(), MAX_CHOICES);
    }
}

//! Reply formatting shared by the command modules.

use crate::{
    core::schedule::{CellContent, DAYS, ScheduleGrid},
    errors::{Error, Result},
    i18n::Language,
};
use poise::serenity_prelude as serenity;

/// Discord's limit on an embed description
const DESCRIPTION_LIMIT: usize = 4000;

/// Discord's limit on an embed field value
const FIELD_LIMIT: usize = 1024;

/// Colour of every listing embed
pub const EMBED_COLOR: u32 = 0x0034_98DB;

/// Reads the id out of an autocompleted value such as `3` or `#3 Ahmed`.
pub fn parse_id(input: &str) -> Result<i64> {
    let digits: String = input
        .trim()
        .trim_start_matches('#')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits
        .parse()
        .map_err(|_| Error::validation(format!("'{input}' is not a valid id")))
}

fn lines_within(lines: &[String], empty: &str, limit: usize) -> String {
    if lines.is_empty() {
        return empty.to_string();
    }
    let mut out = String::new();
    for line in lines {
        // Room is kept for the trailing ellipsis
        if out.len() + line.len() + 1 + '…'.len_utf8() > limit {
            out.push('…');
            break;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Joins `lines` into an embed description, cutting at Discord's size limit.
#[must_use]
pub fn join_lines(lines: &[String], empty: &str) -> String {
    lines_within(lines, empty, DESCRIPTION_LIMIT)
}

/// Joins `lines` into one embed field value, cutting at the field size limit.
#[must_use]
pub fn field_lines(lines: &[String], empty: &str) -> String {
    lines_within(lines, empty, FIELD_LIMIT)
}

/// A single embed field value: `-` when blank, shortened when too long.
///
/// Discord rejects an embed containing an empty field.
#[must_use]
pub fn field_value(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "-".to_string();
    }
    if text.chars().count() <= FIELD_LIMIT {
        return text.to_string();
    }
    let mut short: String = text.chars().take(FIELD_LIMIT - 1).collect();
    short.push('…');
    short
}

/// Embed listing one record per line.
#[must_use]
pub fn list_embed(title: &str, lines: &[String], lang: Language) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(title)
        .color(EMBED_COLOR)
        .description(join_lines(lines, lang.t("no_records")))
}

/// Wraps a rendered HTML document as a file attachment.
#[must_use]
pub fn html_attachment(html: String, file_name: &str) -> serenity::CreateAttachment {
    serenity::CreateAttachment::bytes(html.into_bytes(), file_name)
}

/// Horizontal bar of `width` cells filled in proportion to `value / max`.
#[must_use]
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // Cast safety: ratio is within 0..=1 and width is a handful of cells.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Embed fields for the grid: one per day with lessons, one line per occupied slot.
#[must_use]
pub fn schedule_fields(grid: &ScheduleGrid, lang: Language) -> Vec<(String, String)> {
    let weekdays = lang.weekdays();
    let mut fields = Vec::new();
    for (day, weekday) in weekdays.iter().enumerate().take(DAYS) {
        let mut lines = Vec::new();
        for (slot, row) in grid.rows() {
            let Some(cell) = &row[day] else {
                continue;
            };
            let what = match &cell.content {
                CellContent::Practical {
                    student,
                    instructor,
                } => format!(
                    "🚗 {} / {}",
                    student.as_deref().unwrap_or("-"),
                    instructor.as_deref().unwrap_or("-")
                ),
                CellContent::Theoretical { topic, location } => format!(
                    "📘 {} @ {}",
                    topic.as_deref().unwrap_or("-"),
                    location.as_deref().unwrap_or("-")
                ),
            };
            lines.push(format!(
                "`{slot}` {what} ({}, #{})",
                lang.t(cell.status.label_key()),
                cell.lesson_id
            ));
        }
        if !lines.is_empty() {
            fields.push(((*weekday).to_string(), field_lines(&lines, "-")));
        }
    }
    fields
}

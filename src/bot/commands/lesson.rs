//! Lesson Discord commands and the weekly schedule.
//!
//! A lesson is either practical (student, instructor, vehicle) or theoretical (topic,
//! location). Only the fields of the chosen type are stored.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            choices::{LessonStatusChoice, LessonTypeChoice},
            format::{EMBED_COLOR, parse_id, schedule_fields},
            handlers::{autocomplete, confirm::confirm},
        },
        core::{
            lesson::{self, KindFields, LessonChanges, LessonKind, NewLesson},
            schedule, validate,
        },
        entities::LessonStatus,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    fn parse_optional_id(value: Option<&str>) -> Result<Option<i64>> {
        value.map(parse_id).transpose()
    }

    /// Parent command for managing lessons.
    #[poise::command(
        slash_command,
        subcommands("lesson_add", "lesson_edit", "lesson_delete")
    )]
    pub async fn lesson(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_lesson")).await?;
        Ok(())
    }

    /// Schedules a lesson on one of the hourly slots between 08:00 and 18:00.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn lesson_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Practical or theoretical"] lesson_type: LessonTypeChoice,
        #[description = "Day of the lesson, YYYY-MM-DD"] date: String,
        #[description = "Slot, e.g. 09:00"]
        #[autocomplete = "autocomplete::autocomplete_slot"]
        time: String,
        #[description = "Student (practical)"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: Option<String>,
        #[description = "Instructor (practical)"]
        #[autocomplete = "autocomplete::autocomplete_instructor"]
        instructor: Option<String>,
        #[description = "Vehicle (practical)"]
        #[autocomplete = "autocomplete::autocomplete_vehicle"]
        vehicle: Option<String>,
        #[description = "Topic (theoretical)"] topic: Option<String>,
        #[description = "Room or place (theoretical)"] location: Option<String>,
        #[description = "Status (default: scheduled)"] status: Option<LessonStatusChoice>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let kind = LessonKind::from_fields(
            lesson_type.into(),
            KindFields {
                student_id: parse_optional_id(student.as_deref())?,
                instructor_id: parse_optional_id(instructor.as_deref())?,
                vehicle_id: parse_optional_id(vehicle.as_deref())?,
                topic,
                location,
            },
        )?;

        let created = lesson::create_lesson(
            db,
            NewLesson {
                kind,
                date: validate::date("Date", &date)?,
                time,
                status: status.map_or(LessonStatus::Scheduled, Into::into),
            },
        )
        .await?;

        ctx.say(format!(
            "✅ {} **#{}** {} · {} {}",
            lang.t("saved"),
            created.id,
            lang.t(created.lesson_type.label_key()),
            lang.format_date(created.date),
            created.time
        ))
        .await?;
        Ok(())
    }

    /// Changes the given fields of a lesson. Switching type needs the new type's fields.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn lesson_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Lesson to edit"]
        #[autocomplete = "autocomplete::autocomplete_lesson"]
        lesson: String,
        #[description = "New type"] lesson_type: Option<LessonTypeChoice>,
        #[description = "New day, YYYY-MM-DD"] date: Option<String>,
        #[description = "New slot"]
        #[autocomplete = "autocomplete::autocomplete_slot"]
        time: Option<String>,
        #[description = "New status"] status: Option<LessonStatusChoice>,
        #[description = "New student (practical)"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: Option<String>,
        #[description = "New instructor (practical)"]
        #[autocomplete = "autocomplete::autocomplete_instructor"]
        instructor: Option<String>,
        #[description = "New vehicle (practical)"]
        #[autocomplete = "autocomplete::autocomplete_vehicle"]
        vehicle: Option<String>,
        #[description = "New topic (theoretical)"] topic: Option<String>,
        #[description = "New room or place (theoretical)"] location: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let lesson_id = parse_id(&lesson)?;

        let existing = lesson::get_lesson_by_id(db, lesson_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "lesson",
                id: lesson_id,
            })?;

        let kind = lesson::edited_kind(
            &existing,
            lesson_type.map(Into::into),
            KindFields {
                student_id: parse_optional_id(student.as_deref())?,
                instructor_id: parse_optional_id(instructor.as_deref())?,
                vehicle_id: parse_optional_id(vehicle.as_deref())?,
                topic,
                location,
            },
        )?;
        let changes = LessonChanges {
            kind,
            date: date
                .as_deref()
                .map(|d| validate::date("Date", d))
                .transpose()?,
            time,
            status: status.map(Into::into),
        };
        if changes.is_empty() {
            ctx.say(format!("❌ {}", lang.t("specify_field_to_update")))
                .await?;
            return Ok(());
        }

        let updated = lesson::update_lesson(db, lesson_id, changes).await?;
        ctx.say(format!(
            "✅ {} **#{}** {} · {} {} · {}",
            lang.t("saved"),
            updated.id,
            lang.t(updated.lesson_type.label_key()),
            lang.format_date(updated.date),
            updated.time,
            lang.t(updated.status.label_key())
        ))
        .await?;
        Ok(())
    }

    /// Deletes a lesson after confirmation.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn lesson_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Lesson to delete"]
        #[autocomplete = "autocomplete::autocomplete_lesson"]
        lesson: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let lesson_id = parse_id(&lesson)?;

        let Some(existing) = lesson::get_lesson_by_id(db, lesson_id).await? else {
            ctx.say(format!("❌ {} (#{lesson_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };

        let label = format!(
            "#{} {} {}",
            existing.id,
            lang.format_date(existing.date),
            existing.time
        );
        let prompt = format!("⚠️ {} **{label}**", lang.t("confirm_delete_lesson"));
        if !confirm(ctx, lang, &prompt).await? {
            return Ok(());
        }

        lesson::delete_lesson(db, lesson_id).await?;
        ctx.say(format!("🗑️ {} **{label}**", lang.t("deleted")))
            .await?;
        Ok(())
    }

    /// Shows the weekly grid of lessons, Monday to Sunday, 08:00 to 18:00.
    ///
    /// Without a week every lesson is placed by weekday regardless of its date.
    #[poise::command(slash_command)]
    pub async fn schedule(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Any day of the week to show, YYYY-MM-DD"] week_of: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let week_of = week_of
            .as_deref()
            .map(|d| validate::date("Week", d))
            .transpose()?;
        let grid = schedule::weekly_schedule(db, week_of).await?;

        let mut title = format!("🗓️ {}", lang.t("weekly_schedule"));
        if let Some(monday) = grid.week_start {
            let (_, sunday) = schedule::week_bounds(monday);
            title = format!(
                "{title} · {} - {}",
                lang.format_date(monday),
                lang.format_date(sunday)
            );
        }

        let mut embed = serenity::CreateEmbed::default()
            .title(title)
            .color(EMBED_COLOR);
        if grid.is_empty() {
            embed = embed.description(lang.t("no_lessons"));
        } else {
            embed = embed.fields(
                schedule_fields(&grid, lang)
                    .into_iter()
                    .map(|(day, lines)| (day, lines, false)),
            );
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

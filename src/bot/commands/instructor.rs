//! Instructor Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            format::{list_embed, parse_id},
            handlers::{autocomplete, confirm::confirm},
        },
        core::{
            instructor::{self, InstructorChanges, NewInstructor},
            validate, vehicle,
        },
        errors::{Error, Result},
    };

    /// Parent command for managing instructors.
    #[poise::command(
        slash_command,
        subcommands(
            "instructor_add",
            "instructor_edit",
            "instructor_delete",
            "instructor_list"
        )
    )]
    pub async fn instructor(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_instructor")).await?;
        Ok(())
    }

    /// Adds an instructor, optionally with an assigned vehicle.
    #[poise::command(slash_command, rename = "add")]
    pub async fn instructor_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Full name"] name: String,
        #[description = "Phone number"] phone: String,
        #[description = "Hire date, YYYY-MM-DD"] hire_date: String,
        #[description = "Vehicle usually driven"]
        #[autocomplete = "autocomplete::autocomplete_vehicle"]
        vehicle: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let created = instructor::create_instructor(
            db,
            NewInstructor {
                name,
                phone,
                hire_date: validate::date("Hire date", &hire_date)?,
                assigned_vehicle_id: vehicle.as_deref().map(parse_id).transpose()?,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ {} **#{} {}**",
            lang.t("saved"),
            created.id,
            created.name
        ))
        .await?;
        Ok(())
    }

    /// Changes the given fields of an instructor.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn instructor_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Instructor to edit"]
        #[autocomplete = "autocomplete::autocomplete_instructor"]
        instructor: String,
        #[description = "New full name"] name: Option<String>,
        #[description = "New phone number"] phone: Option<String>,
        #[description = "New hire date, YYYY-MM-DD"] hire_date: Option<String>,
        #[description = "New assigned vehicle"]
        #[autocomplete = "autocomplete::autocomplete_vehicle"]
        vehicle: Option<String>,
        #[description = "Remove the assigned vehicle"] clear_vehicle: Option<bool>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let instructor_id = parse_id(&instructor)?;

        let assigned_vehicle_id = if clear_vehicle.unwrap_or(false) {
            Some(None)
        } else {
            vehicle.as_deref().map(parse_id).transpose()?.map(Some)
        };
        let changes = InstructorChanges {
            name,
            phone,
            hire_date: hire_date
                .as_deref()
                .map(|d| validate::date("Hire date", d))
                .transpose()?,
            assigned_vehicle_id,
        };
        if changes.is_empty() {
            ctx.say(format!("❌ {}", lang.t("specify_field_to_update")))
                .await?;
            return Ok(());
        }

        let updated = instructor::update_instructor(db, instructor_id, changes).await?;
        ctx.say(format!(
            "✅ {} **#{} {}**",
            lang.t("saved"),
            updated.id,
            updated.name
        ))
        .await?;
        Ok(())
    }

    /// Deletes an instructor after confirmation.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn instructor_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Instructor to delete"]
        #[autocomplete = "autocomplete::autocomplete_instructor"]
        instructor: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let instructor_id = parse_id(&instructor)?;

        let Some(existing) = instructor::get_instructor_by_id(db, instructor_id).await? else {
            ctx.say(format!("❌ {} (#{instructor_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };

        let prompt = format!(
            "⚠️ {} **{}**",
            lang.t("confirm_delete_instructor"),
            existing.name
        );
        if !confirm(ctx, lang, &prompt).await? {
            return Ok(());
        }

        instructor::delete_instructor(db, instructor_id).await?;
        ctx.say(format!("🗑️ {} **{}**", lang.t("deleted"), existing.name))
            .await?;
        Ok(())
    }

    /// Lists instructors with their hire date and vehicle.
    #[poise::command(slash_command, rename = "list")]
    pub async fn instructor_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let instructors = instructor::get_all_instructors(db).await?;
        let vehicles = vehicle::get_all_vehicles(db).await?;

        let lines: Vec<String> = instructors
            .iter()
            .map(|i| {
                format!(
                    "`#{}` **{}** · {} · {}: {} · {}: {}",
                    i.id,
                    i.name,
                    i.phone,
                    lang.t("hire_date"),
                    lang.format_date(i.hire_date),
                    lang.t("assigned_vehicle"),
                    vehicle::assigned_vehicle_label(i.assigned_vehicle_id, &vehicles, lang)
                )
            })
            .collect();

        let embed = list_embed(&format!("👨‍🏫 {}", lang.t("instructors")), &lines, lang);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

//! Vehicle Discord commands - the school's fleet.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            choices::VehicleStatusChoice,
            format::{list_embed, parse_id},
            handlers::{autocomplete, confirm::confirm},
        },
        core::{
            validate,
            vehicle::{self, NewVehicle, VehicleChanges},
        },
        entities::VehicleStatus,
        errors::{Error, Result},
    };

    /// Parent command for managing vehicles.
    #[poise::command(
        slash_command,
        subcommands("vehicle_add", "vehicle_edit", "vehicle_delete", "vehicle_list")
    )]
    pub async fn vehicle(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_vehicle")).await?;
        Ok(())
    }

    /// Adds a vehicle. The status defaults to available.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn vehicle_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Kind of vehicle, e.g. car, truck, bus"] vehicle_type: String,
        #[description = "Make and model"] brand: String,
        #[description = "License plate"] registration: String,
        #[description = "Year of purchase"] purchase_year: i32,
        #[description = "Last maintenance, YYYY-MM-DD"] last_maintenance: String,
        #[description = "Status (default: available)"] status: Option<VehicleStatusChoice>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let created = vehicle::create_vehicle(
            db,
            NewVehicle {
                vehicle_type,
                brand,
                registration,
                purchase_year,
                status: status.map_or(VehicleStatus::Available, Into::into),
                last_maintenance: validate::date("Last maintenance", &last_maintenance)?,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ {} **#{} {}**",
            lang.t("saved"),
            created.id,
            vehicle::vehicle_label(&created)
        ))
        .await?;
        Ok(())
    }

    /// Changes the given fields of a vehicle.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn vehicle_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Vehicle to edit"]
        #[autocomplete = "autocomplete::autocomplete_vehicle"]
        vehicle: String,
        #[description = "New kind of vehicle"] vehicle_type: Option<String>,
        #[description = "New make and model"] brand: Option<String>,
        #[description = "New license plate"] registration: Option<String>,
        #[description = "New year of purchase"] purchase_year: Option<i32>,
        #[description = "New status"] status: Option<VehicleStatusChoice>,
        #[description = "New last maintenance date, YYYY-MM-DD"]
        last_maintenance: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let vehicle_id = parse_id(&vehicle)?;

        let changes = VehicleChanges {
            vehicle_type,
            brand,
            registration,
            purchase_year,
            status: status.map(Into::into),
            last_maintenance: last_maintenance
                .as_deref()
                .map(|d| validate::date("Last maintenance", d))
                .transpose()?,
        };
        if changes.is_empty() {
            ctx.say(format!("❌ {}", lang.t("specify_field_to_update")))
                .await?;
            return Ok(());
        }

        let updated = vehicle::update_vehicle(db, vehicle_id, changes).await?;
        ctx.say(format!(
            "✅ {} **#{} {}**",
            lang.t("saved"),
            updated.id,
            vehicle::vehicle_label(&updated)
        ))
        .await?;
        Ok(())
    }

    /// Deletes a vehicle after confirmation.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn vehicle_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Vehicle to delete"]
        #[autocomplete = "autocomplete::autocomplete_vehicle"]
        vehicle: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let vehicle_id = parse_id(&vehicle)?;

        let Some(existing) = vehicle::get_vehicle_by_id(db, vehicle_id).await? else {
            ctx.say(format!("❌ {} (#{vehicle_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };

        let label = vehicle::vehicle_label(&existing);
        let prompt = format!("⚠️ {} **{label}**", lang.t("confirm_delete_vehicle"));
        if !confirm(ctx, lang, &prompt).await? {
            return Ok(());
        }

        vehicle::delete_vehicle(db, vehicle_id).await?;
        ctx.say(format!("🗑️ {} **{label}**", lang.t("deleted")))
            .await?;
        Ok(())
    }

    /// Lists the fleet with status and maintenance dates.
    #[poise::command(slash_command, rename = "list")]
    pub async fn vehicle_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let lines: Vec<String> = vehicle::get_all_vehicles(db)
            .await?
            .iter()
            .map(|v| {
                format!(
                    "`#{}` **{}** · {} · {} · {}: {} · {}: {}",
                    v.id,
                    vehicle::vehicle_label(v),
                    v.vehicle_type,
                    lang.t(v.status.label_key()),
                    lang.t("purchase_year"),
                    lang.localize_digits(&v.purchase_year.to_string()),
                    lang.t("last_maintenance"),
                    lang.format_date(v.last_maintenance)
                )
            })
            .collect();

        let embed = list_embed(&format!("🚗 {}", lang.t("vehicles")), &lines, lang);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

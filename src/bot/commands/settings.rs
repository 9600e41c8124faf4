//! Settings Discord commands - interface language and school identity.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            choices::LanguageChoice,
            format::{EMBED_COLOR, field_value},
        },
        core::settings,
        errors::{Error, Result},
        i18n::Language,
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for the school's settings.
    #[poise::command(
        slash_command,
        subcommands("settings_show", "settings_language", "settings_school")
    )]
    pub async fn settings(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_settings")).await?;
        Ok(())
    }

    /// Shows the current language and school identity.
    #[poise::command(slash_command, rename = "show")]
    pub async fn settings_show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let current = settings::load_settings(&data.database, &data.config).await?;
        let lang = current.language;

        let embed = serenity::CreateEmbed::default()
            .title(format!("⚙️ {}", lang.t("settings")))
            .color(EMBED_COLOR)
            .field(lang.t("language"), lang.native_name(), true)
            .field(lang.t("currency"), lang.t("currency"), true)
            .field(lang.t("school_name"), field_value(&current.school_name), false)
            .field(
                lang.t("school_address"),
                field_value(&current.school_address),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Switches the language of every reply and printed document.
    #[poise::command(slash_command, rename = "language")]
    pub async fn settings_language(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Interface language"] language: LanguageChoice,
    ) -> Result<()> {
        let language: Language = language.into();
        settings::set_language(&ctx.data().database, language).await?;

        // Confirm in the newly selected language
        ctx.say(format!(
            "✅ {} ({})",
            language.t("settings_saved"),
            language.native_name()
        ))
        .await?;
        Ok(())
    }

    /// Changes the school name and/or address printed on receipts and files.
    #[poise::command(slash_command, rename = "school")]
    pub async fn settings_school(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "School name"] name: Option<String>,
        #[description = "School address"] address: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        if name.is_none() && address.is_none() {
            ctx.say(format!("❌ {}", lang.t("specify_name_or_address")))
                .await?;
            return Ok(());
        }

        settings::set_school_identity(&ctx.data().database, name.as_deref(), address.as_deref())
            .await?;
        ctx.say(format!("✅ {}", lang.t("settings_saved"))).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

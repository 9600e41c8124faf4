//! General Discord commands - ping and help.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let help_text = format!(
            "**{title}**\n\n\
            **{students}**\n\
            • `/student add|edit|delete|list|show|print` - {student_files}\n\
            • `/student doc_add|doc_remove` - {documents}\n\n\
            **{instructors} / {vehicles}**\n\
            • `/instructor add|edit|delete|list`\n\
            • `/vehicle add|edit|delete|list`\n\n\
            **{schedule}**\n\
            • `/lesson add|edit|delete` - {lessons}\n\
            • `/schedule [week_of]` - {weekly_grid}\n\n\
            **{finance}**\n\
            • `/payment add|edit|delete|list|receipt`\n\
            • `/expense add|edit|delete|list`\n\
            • `/finance` - {finance_summary}\n\n\
            **{settings}**\n\
            • `/dashboard` - {dashboard}\n\
            • `/settings show|language|school`\n\
            • `/ping` - {ping}",
            title = lang.t("app_title"),
            students = lang.t("students"),
            instructors = lang.t("instructors"),
            vehicles = lang.t("vehicles"),
            schedule = lang.t("schedule"),
            finance = lang.t("finance"),
            settings = lang.t("settings"),
            student_files = lang.t("help_student_files"),
            documents = lang.t("help_documents"),
            lessons = lang.t("help_lessons"),
            weekly_grid = lang.t("help_weekly_grid"),
            finance_summary = lang.t("help_finance_summary"),
            dashboard = lang.t("help_dashboard"),
            ping = lang.t("help_ping"),
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

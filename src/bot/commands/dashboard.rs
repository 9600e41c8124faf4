//! Dashboard command - headline figures of the school.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            format::{EMBED_COLOR, format_bar},
        },
        core::dashboard,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Shows student, staff, fleet and income figures with the exam success rate.
    #[poise::command(slash_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let today = chrono::Local::now().date_naive();

        let stats = dashboard::dashboard_stats(db, today).await?;

        let peak = stats
            .income_by_month
            .iter()
            .map(|m| m.amount)
            .fold(0.0_f64, f64::max);
        let mut chart = String::new();
        for month in &stats.income_by_month {
            writeln!(
                &mut chart,
                "`{}-{:02}` {} {}",
                month.year,
                month.month,
                format_bar(month.amount, peak, 10),
                lang.format_money(month.amount)
            )?;
        }

        let outcomes = format!(
            "{} {:.0}%\n{}: {} · {}: {}",
            format_bar(stats.success_rate(), 100.0, 10),
            stats.success_rate(),
            lang.t("status_successful"),
            lang.localize_digits(&stats.successful.to_string()),
            lang.t("status_failed"),
            lang.localize_digits(&stats.failed.to_string()),
        );

        let embed = serenity::CreateEmbed::default()
            .title(format!("📊 {}", lang.t("dashboard")))
            .color(EMBED_COLOR)
            .field(
                lang.t("total_students"),
                lang.localize_digits(&stats.total_students.to_string()),
                true,
            )
            .field(
                lang.t("active_instructors"),
                lang.localize_digits(&stats.instructors.to_string()),
                true,
            )
            .field(
                lang.t("available_vehicles"),
                lang.localize_digits(&stats.available_vehicles.to_string()),
                true,
            )
            .field(
                lang.t("monthly_income"),
                lang.format_money(stats.monthly_income),
                true,
            )
            .field(lang.t("monthly_income_chart_title"), chart, false)
            .field(lang.t("exam_success_rate"), outcomes, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

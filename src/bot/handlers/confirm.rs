//! Confirm/cancel buttons guarding destructive commands.

use crate::{
    bot::BotData,
    errors::{Error, Result},
    i18n::Language,
};
use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::debug;

/// How long the buttons stay active.
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

/// Asks the invoking user to confirm `prompt` with buttons.
///
/// Returns `true` only when the confirm button was pressed. Pressing cancel or letting
/// the prompt time out both leave the data untouched. The prompt is edited to show the
/// outcome and the buttons are removed.
pub async fn confirm(
    ctx: poise::Context<'_, BotData, Error>,
    lang: Language,
    prompt: &str,
) -> Result<bool> {
    let ctx_id = ctx.id();
    let confirm_id = format!("{ctx_id}-confirm");
    let cancel_id = format!("{ctx_id}-cancel");

    let buttons = serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(&confirm_id)
            .style(serenity::ButtonStyle::Danger)
            .label(lang.t("confirm")),
        serenity::CreateButton::new(&cancel_id)
            .style(serenity::ButtonStyle::Secondary)
            .label(lang.t("cancel")),
    ]);
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .content(prompt)
                .components(vec![buttons]),
        )
        .await?;

    let author = ctx.author().id;
    let prefix = format!("{ctx_id}-");
    let press = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(author)
        .filter(move |press| press.data.custom_id.starts_with(&prefix))
        .timeout(CONFIRM_TIMEOUT)
        .await;

    let confirmed = press
        .as_ref()
        .is_some_and(|press| press.data.custom_id == confirm_id);
    debug!("Confirmation for `{}`: {confirmed}", ctx.command().qualified_name);

    let outcome = format!(
        "{prompt}\n**{}**",
        if confirmed {
            lang.t("confirm")
        } else {
            lang.t("cancelled")
        }
    );
    if let Some(press) = press {
        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(outcome)
                        .components(Vec::new()),
                ),
            )
            .await?;
    } else {
        reply
            .edit(
                ctx,
                poise::CreateReply::default()
                    .content(outcome)
                    .components(Vec::new()),
            )
            .await?;
    }

    Ok(confirmed)
}

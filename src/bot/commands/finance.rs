//! Finance Discord commands - payments, expenses and the profit summary.
//!
//! Totals are never stored; every reply recomputes them from the records.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            choices::ExpenseCategoryChoice,
            format::{EMBED_COLOR, html_attachment, list_embed, parse_id},
            handlers::{autocomplete, confirm::confirm},
        },
        core::{
            finance::{self, ExpenseChanges, NewExpense, NewPayment, PaymentChanges},
            print, validate,
        },
        errors::{Error, Result},
    };
    use chrono::NaiveDate;
    use poise::serenity_prelude as serenity;

    fn date_or_today(value: Option<&str>) -> Result<NaiveDate> {
        value.map_or_else(
            || Ok(chrono::Local::now().date_naive()),
            |d| validate::date("Date", d),
        )
    }

    fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
        value.map(|d| validate::date("Date", d)).transpose()
    }

    /// Parent command for recording payments received from students.
    #[poise::command(
        slash_command,
        subcommands(
            "payment_add",
            "payment_edit",
            "payment_delete",
            "payment_list",
            "payment_receipt"
        )
    )]
    pub async fn payment(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_payment")).await?;
        Ok(())
    }

    /// Records a payment. The date defaults to today.
    #[poise::command(slash_command, rename = "add")]
    pub async fn payment_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student who paid"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "Amount received"] amount: f64,
        #[description = "What the payment covers"] description: String,
        #[description = "Day of the payment, YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let created = finance::create_payment(
            db,
            NewPayment {
                student_id: parse_id(&student)?,
                amount,
                date: date_or_today(date.as_deref())?,
                description,
            },
        )
        .await?;

        let (_, remaining) = finance::student_balance(db, created.student_id).await?;
        ctx.say(format!(
            "✅ {} **#{}** {} · {}: {}",
            lang.t("saved"),
            created.id,
            lang.format_money(created.amount),
            lang.t("remaining_balance"),
            lang.format_money(remaining)
        ))
        .await?;
        Ok(())
    }

    /// Changes the given fields of a payment.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn payment_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment to edit"]
        #[autocomplete = "autocomplete::autocomplete_payment"]
        payment: String,
        #[description = "New student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: Option<String>,
        #[description = "New amount"] amount: Option<f64>,
        #[description = "New description"] description: Option<String>,
        #[description = "New date, YYYY-MM-DD"] date: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let payment_id = parse_id(&payment)?;

        let changes = PaymentChanges {
            student_id: student.as_deref().map(parse_id).transpose()?,
            amount,
            date: optional_date(date.as_deref())?,
            description,
        };
        if changes.is_empty() {
            ctx.say(format!("❌ {}", lang.t("specify_field_to_update")))
                .await?;
            return Ok(());
        }

        let updated = finance::update_payment(db, payment_id, changes).await?;
        ctx.say(format!(
            "✅ {} **#{}** {}",
            lang.t("saved"),
            updated.id,
            lang.format_money(updated.amount)
        ))
        .await?;
        Ok(())
    }

    /// Deletes a payment after confirmation.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn payment_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment to delete"]
        #[autocomplete = "autocomplete::autocomplete_payment"]
        payment: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let payment_id = parse_id(&payment)?;

        let Some(existing) = finance::get_payment_by_id(db, payment_id).await? else {
            ctx.say(format!("❌ {} (#{payment_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };

        let label = format!("#{} {}", existing.id, lang.format_money(existing.amount));
        let prompt = format!("⚠️ {} **{label}**", lang.t("confirm_delete_payment"));
        if !confirm(ctx, lang, &prompt).await? {
            return Ok(());
        }

        finance::delete_payment(db, payment_id).await?;
        ctx.say(format!("🗑️ {} **{label}**", lang.t("deleted")))
            .await?;
        Ok(())
    }

    /// Lists every payment with the name of the student who made it.
    #[poise::command(slash_command, rename = "list")]
    pub async fn payment_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let lines: Vec<String> = finance::payment_rows(db, lang)
            .await?
            .iter()
            .map(|row| {
                format!(
                    "`#{}` {} · **{}** · {} · {}",
                    row.payment.id,
                    lang.format_date(row.payment.date),
                    row.student_name,
                    lang.format_money(row.payment.amount),
                    row.payment.description
                )
            })
            .collect();

        let embed = list_embed(&format!("💵 {}", lang.t("payments_income")), &lines, lang);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Sends a printable receipt for one payment.
    #[poise::command(slash_command, rename = "receipt")]
    pub async fn payment_receipt(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment to print"]
        #[autocomplete = "autocomplete::autocomplete_payment"]
        payment: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let data = ctx.data();
        let payment_id = parse_id(&payment)?;
        let today = chrono::Local::now().date_naive();

        let html = print::payment_receipt(&data.database, &data.config, payment_id, today).await?;
        ctx.send(
            poise::CreateReply::default()
                .content(format!("🧾 {}", lang.t("payment_receipt")))
                .attachment(html_attachment(html, &format!("receipt-{payment_id}.html"))),
        )
        .await?;
        Ok(())
    }

    /// Parent command for recording the school's expenses.
    #[poise::command(
        slash_command,
        subcommands("expense_add", "expense_edit", "expense_delete", "expense_list")
    )]
    pub async fn expense(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_expense")).await?;
        Ok(())
    }

    /// Records an expense. The date defaults to today.
    #[poise::command(slash_command, rename = "add")]
    pub async fn expense_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Bookkeeping category"] category: ExpenseCategoryChoice,
        #[description = "Amount spent"] amount: f64,
        #[description = "What was paid for"] description: String,
        #[description = "Day of the expense, YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let created = finance::create_expense(
            db,
            NewExpense {
                category: category.into(),
                amount,
                date: date_or_today(date.as_deref())?,
                description,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ {} **#{}** {} · {}",
            lang.t("saved"),
            created.id,
            lang.t(created.category.label_key()),
            lang.format_money(created.amount)
        ))
        .await?;
        Ok(())
    }

    /// Changes the given fields of an expense.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn expense_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense to edit"]
        #[autocomplete = "autocomplete::autocomplete_expense"]
        expense: String,
        #[description = "New category"] category: Option<ExpenseCategoryChoice>,
        #[description = "New amount"] amount: Option<f64>,
        #[description = "New description"] description: Option<String>,
        #[description = "New date, YYYY-MM-DD"] date: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let expense_id = parse_id(&expense)?;

        let changes = ExpenseChanges {
            category: category.map(Into::into),
            amount,
            date: optional_date(date.as_deref())?,
            description,
        };
        if changes.is_empty() {
            ctx.say(format!("❌ {}", lang.t("specify_field_to_update")))
                .await?;
            return Ok(());
        }

        let updated = finance::update_expense(db, expense_id, changes).await?;
        ctx.say(format!(
            "✅ {} **#{}** {} · {}",
            lang.t("saved"),
            updated.id,
            lang.t(updated.category.label_key()),
            lang.format_money(updated.amount)
        ))
        .await?;
        Ok(())
    }

    /// Deletes an expense after confirmation.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn expense_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense to delete"]
        #[autocomplete = "autocomplete::autocomplete_expense"]
        expense: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let expense_id = parse_id(&expense)?;

        let Some(existing) = finance::get_expense_by_id(db, expense_id).await? else {
            ctx.say(format!("❌ {} (#{expense_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };

        let label = format!("#{} {}", existing.id, lang.format_money(existing.amount));
        let prompt = format!("⚠️ {} **{label}**", lang.t("confirm_delete_expense"));
        if !confirm(ctx, lang, &prompt).await? {
            return Ok(());
        }

        finance::delete_expense(db, expense_id).await?;
        ctx.say(format!("🗑️ {} **{label}**", lang.t("deleted")))
            .await?;
        Ok(())
    }

    /// Lists every expense.
    #[poise::command(slash_command, rename = "list")]
    pub async fn expense_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let lines: Vec<String> = finance::get_all_expenses(db)
            .await?
            .iter()
            .map(|e| {
                format!(
                    "`#{}` {} · **{}** · {} · {}",
                    e.id,
                    lang.format_date(e.date),
                    lang.t(e.category.label_key()),
                    lang.format_money(e.amount),
                    e.description
                )
            })
            .collect();

        let embed = list_embed(&format!("🧾 {}", lang.t("expenses")), &lines, lang);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows total income, total expenses and net profit.
    #[poise::command(slash_command)]
    pub async fn finance(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let summary = finance::finance_summary(db).await?;
        let profit_icon = if summary.net_profit < 0.0 { "📉" } else { "📈" };

        let embed = serenity::CreateEmbed::default()
            .title(format!("💰 {}", lang.t("finance")))
            .color(EMBED_COLOR)
            .field(
                lang.t("total_income"),
                lang.format_money(summary.total_income),
                true,
            )
            .field(
                lang.t("total_expenses"),
                lang.format_money(summary.total_expenses),
                true,
            )
            .field(
                lang.t("net_profit"),
                format!("{profit_icon} {}", lang.format_money(summary.net_profit)),
                true,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

//! Student Discord commands - registration, files, documents and printing.
//!
//! `/student` groups the subcommands. Balances shown here are recomputed from the
//! payments on every call.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            choices::{LicenseChoice, StudentStatusChoice},
            format::{EMBED_COLOR, field_lines, field_value, html_attachment, list_embed, parse_id},
            handlers::{autocomplete, confirm::confirm},
        },
        core::{
            finance, print,
            student::{self, NewStudent, StudentChanges},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing students and their files.
    #[poise::command(
        slash_command,
        subcommands(
            "student_add",
            "student_edit",
            "student_delete",
            "student_list",
            "student_show",
            "student_print",
            "student_doc_add",
            "student_doc_remove"
        )
    )]
    pub async fn student(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let lang = ctx.data().language().await?;
        ctx.say(lang.t("help_student")).await?;
        Ok(())
    }

    /// Registers a new student. The registration date defaults to today.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn student_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Full name"] name: String,
        #[description = "National identity card number"] national_id: String,
        #[description = "Phone number"] phone: String,
        #[description = "Postal address"] address: String,
        #[description = "License category"] license_type: LicenseChoice,
        #[description = "Agreed price of the training"] total_training_cost: f64,
        #[description = "Training status (default: open file)"]
        status: Option<StudentStatusChoice>,
        #[description = "Registration date, YYYY-MM-DD (default: today)"]
        registration_date: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let registration_date = registration_date
            .as_deref()
            .map(|d| crate::core::validate::date("Registration date", d))
            .transpose()?;

        let created = student::create_student(
            db,
            NewStudent {
                name,
                address,
                phone,
                national_id,
                license_type: license_type.into(),
                status: status.map_or(crate::entities::StudentStatus::Open, Into::into),
                total_training_cost,
                registration_date,
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

    /// Changes the given fields of a student. Omitted fields stay as they are.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn student_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student to edit"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "New full name"] name: Option<String>,
        #[description = "New national id"] national_id: Option<String>,
        #[description = "New phone number"] phone: Option<String>,
        #[description = "New address"] address: Option<String>,
        #[description = "New license category"] license_type: Option<LicenseChoice>,
        #[description = "New training status"] status: Option<StudentStatusChoice>,
        #[description = "New training cost"] total_training_cost: Option<f64>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let student_id = parse_id(&student)?;

        let changes = StudentChanges {
            name,
            address,
            phone,
            national_id,
            license_type: license_type.map(Into::into),
            status: status.map(Into::into),
            total_training_cost,
        };
        if changes.is_empty() {
            ctx.say(format!("❌ {}", lang.t("specify_field_to_update")))
                .await?;
            return Ok(());
        }

        let updated = student::update_student(db, student_id, changes).await?;
        ctx.say(format!(
            "✅ {} **#{} {}**",
            lang.t("saved"),
            updated.id,
            updated.name
        ))
        .await?;
        Ok(())
    }

    /// Deletes a student and their documents after confirmation.
    ///
    /// Payments and lessons that mention the student are kept.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn student_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student to delete"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let student_id = parse_id(&student)?;

        let Some(existing) = student::get_student_by_id(db, student_id).await? else {
            ctx.say(format!("❌ {} (#{student_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };

        let prompt = format!(
            "⚠️ {} **{}**",
            lang.t("confirm_delete_student"),
            existing.name
        );
        if !confirm(ctx, lang, &prompt).await? {
            return Ok(());
        }

        student::delete_student(db, student_id).await?;
        ctx.say(format!("🗑️ {} **{}**", lang.t("deleted"), existing.name))
            .await?;
        Ok(())
    }

    /// Lists students with their balance, optionally filtered by name or national id.
    #[poise::command(slash_command, rename = "list")]
    pub async fn student_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by name or national id"] search: Option<String>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;

        let students =
            student::search_students(db, search.as_deref().unwrap_or_default()).await?;
        let payments = finance::get_all_payments(db).await?;

        let lines: Vec<String> = students
            .iter()
            .map(|s| {
                format!(
                    "`#{}` **{}** · {} · {} · {} · {}: {}",
                    s.id,
                    s.name,
                    s.national_id,
                    s.license_type.code(),
                    lang.t(s.status.label_key()),
                    lang.t("balance"),
                    lang.format_money(finance::balance(s, &payments))
                )
            })
            .collect();

        let embed = list_embed(&format!("🎓 {}", lang.t("students")), &lines, lang);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows a student's full file with balance and documents.
    #[poise::command(slash_command, rename = "show")]
    pub async fn student_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student to show"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let student_id = parse_id(&student)?;

        let Some(s) = student::get_student_by_id(db, student_id).await? else {
            ctx.say(format!("❌ {} (#{student_id})", lang.t("not_found")))
                .await?;
            return Ok(());
        };
        let (paid, remaining) = finance::student_balance(db, student_id).await?;
        let documents = student::get_documents_for_student(db, student_id).await?;

        let doc_lines: Vec<String> = documents
            .iter()
            .map(|d| {
                format!(
                    "`#{}` {} ({}, {})",
                    d.id,
                    d.name,
                    d.file_name,
                    lang.format_date(d.upload_date)
                )
            })
            .collect();
        let docs_text = field_lines(&doc_lines, lang.t("no_documents_attached"));

        let embed = serenity::CreateEmbed::default()
            .title(format!("🎓 {} #{}", s.name, s.id))
            .color(EMBED_COLOR)
            .field(lang.t("national_id"), field_value(&s.national_id), true)
            .field(lang.t("phone_number"), field_value(&s.phone), true)
            .field(lang.t("address"), field_value(&s.address), false)
            .field(lang.t("license_type"), s.license_type.code(), true)
            .field(
                lang.t("registration_date"),
                lang.format_date(s.registration_date),
                true,
            )
            .field(lang.t("status"), lang.t(s.status.label_key()), true)
            .field(
                lang.t("total_cost"),
                lang.format_money(s.total_training_cost),
                true,
            )
            .field(lang.t("amount_paid"), lang.format_money(paid), true)
            .field(lang.t("remaining_balance"), lang.format_money(remaining), true)
            .field(lang.t("attached_documents"), docs_text, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Sends the student's file as a printable HTML document.
    #[poise::command(slash_command, rename = "print")]
    pub async fn student_print(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student to print"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let data = ctx.data();
        let student_id = parse_id(&student)?;
        let today = chrono::Local::now().date_naive();

        let html = print::student_file(&data.database, &data.config, student_id, today).await?;
        ctx.send(
            poise::CreateReply::default()
                .content(format!("🖨️ {}", lang.t("student_file")))
                .attachment(html_attachment(html, &format!("student-{student_id}.html"))),
        )
        .await?;
        Ok(())
    }

    /// Attaches a document to a student's file. Both a name and a file are required.
    #[poise::command(slash_command, rename = "doc_add")]
    pub async fn student_doc_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student the document belongs to"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "What the document is, e.g. medical certificate"] name: String,
        #[description = "The uploaded file"] file: Option<serenity::Attachment>,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let student_id = parse_id(&student)?;

        let file_name = file.map(|f| f.filename).unwrap_or_default();
        if name.trim().is_empty() || file_name.trim().is_empty() {
            ctx.say(format!("❌ {}", lang.t("alert_doc_name_file")))
                .await?;
            return Ok(());
        }

        let today = chrono::Local::now().date_naive();
        let document = student::attach_document(db, student_id, &name, &file_name, today).await?;
        ctx.say(format!(
            "📎 {} **{}** ({})",
            lang.t("saved"),
            document.name,
            document.file_name
        ))
        .await?;
        Ok(())
    }

    /// Removes a document from a student's file.
    #[poise::command(slash_command, rename = "doc_remove")]
    pub async fn student_doc_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Document to remove"]
        #[autocomplete = "autocomplete::autocomplete_document"]
        document: String,
    ) -> Result<()> {
        let lang = ctx.data().language().await?;
        let db = &ctx.data().database;
        let document_id = parse_id(&document)?;

        let removed = student::remove_document(db, document_id).await?;
        ctx.say(format!("🗑️ {} **{}**", lang.t("deleted"), removed.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

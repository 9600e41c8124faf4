//! Printable documents - Payment receipts and student files rendered as standalone HTML.
//!
//! Each document carries its own `lang`/`dir` attributes and inline style so it prints
//! correctly once opened in a browser. All record text is HTML-escaped.

use crate::{
    config::school::AppConfig,
    core::{finance, settings, student},
    entities::{
        payment::Model as PaymentModel, student::Model as StudentModel,
        student_document::Model as DocumentModel,
    },
    errors::{Error, Result},
    i18n::Language,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Values shared by every printed document.
#[derive(Debug, Clone)]
pub struct PrintContext {
    /// Language and direction of the page
    pub lang: Language,
    /// Printed in the header
    pub school_name: String,
    /// Printed under the name
    pub school_address: String,
    /// Date shown in the footer
    pub print_date: NaiveDate,
}

impl PrintContext {
    /// Builds the context from the stored settings.
    pub async fn load(
        db: &DatabaseConnection,
        config: &AppConfig,
        print_date: NaiveDate,
    ) -> Result<Self> {
        let settings = settings::load_settings(db, config).await?;
        Ok(Self {
            lang: settings.language,
            school_name: settings.school_name,
            school_address: settings.school_address,
            print_date,
        })
    }
}

/// Escapes the five characters significant in HTML text and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn open_document(out: &mut String, ctx: &PrintContext, title: &str) -> Result<()> {
    let dir = ctx.lang.direction();
    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"{lang}\" dir=\"{dir}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n\
         body {{ font-family: 'Cairo', 'Segoe UI', sans-serif; direction: {dir}; text-align: {align}; padding: 20px; }}\n\
         .sheet {{ border: 1px solid #ccc; padding: 24px; max-width: 800px; margin: auto; }}\n\
         h1 {{ text-align: center; }}\n\
         h2 {{ border-bottom: 1px solid #ddd; padding-bottom: 4px; }}\n\
         table {{ width: 100%; border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #ddd; padding: 6px; text-align: {align}; }}\n\
         .footer {{ margin-top: 32px; text-align: center; font-size: 0.9em; color: #555; }}\n\
         </style>\n</head>\n<body>\n<div class=\"sheet\">\n<h1>{title}</h1>\n",
        lang = ctx.lang.code(),
        dir = dir.as_str(),
        align = dir.align(),
        title = escape_html(title),
    )?;
    field(out, ctx.lang.t("school_name"), &ctx.school_name)?;
    if !ctx.school_address.is_empty() {
        field(out, ctx.lang.t("school_address"), &ctx.school_address)?;
    }
    field(
        out,
        ctx.lang.t("print_date"),
        &ctx.lang.format_date(ctx.print_date),
    )?;
    out.push_str("<hr/>\n");
    Ok(())
}

fn close_document(out: &mut String) {
    out.push_str("</div>\n</body>\n</html>\n");
}

/// One `<p><strong>label:</strong> value</p>` line.
fn field(out: &mut String, label: &str, value: &str) -> Result<()> {
    writeln!(
        out,
        "<p><strong>{}:</strong> {}</p>",
        escape_html(label),
        escape_html(value)
    )
    .map_err(Into::into)
}

/// Renders a payment receipt. `student_name` is `None` for a deleted student.
pub fn payment_receipt_html(
    ctx: &PrintContext,
    payment: &PaymentModel,
    student_name: Option<&str>,
) -> Result<String> {
    let lang = ctx.lang;
    let mut out = String::new();
    open_document(&mut out, ctx, lang.t("payment_receipt"))?;

    field(
        &mut out,
        lang.t("received_from"),
        student_name.unwrap_or_else(|| lang.t("unknown")),
    )?;
    field(&mut out, lang.t("amount_of"), &lang.format_money(payment.amount))?;
    field(&mut out, lang.t("for_reason"), &payment.description)?;
    field(&mut out, lang.t("on_date"), &lang.format_date(payment.date))?;

    writeln!(
        out,
        "<p class=\"footer\">{}</p>",
        escape_html(lang.t("receipt_footer"))
    )?;
    close_document(&mut out);
    Ok(out)
}

/// Renders a student's complete file: identity, training, money and documents.
pub fn student_file_html(
    ctx: &PrintContext,
    student: &StudentModel,
    payments: &[PaymentModel],
    documents: &[DocumentModel],
) -> Result<String> {
    let lang = ctx.lang;
    let mut out = String::new();
    open_document(&mut out, ctx, lang.t("student_file"))?;

    writeln!(out, "<h2>{}</h2>", escape_html(lang.t("personal_information")))?;
    field(&mut out, lang.t("full_name"), &student.name)?;
    field(&mut out, lang.t("national_id"), &student.national_id)?;
    field(&mut out, lang.t("phone_number"), &student.phone)?;
    field(&mut out, lang.t("address"), &student.address)?;

    writeln!(out, "<h2>{}</h2>", escape_html(lang.t("training_information")))?;
    field(&mut out, lang.t("license_type"), student.license_type.code())?;
    field(
        &mut out,
        lang.t("registration_date"),
        &lang.format_date(student.registration_date),
    )?;
    field(&mut out, lang.t("status"), lang.t(student.status.label_key()))?;

    writeln!(out, "<h2>{}</h2>", escape_html(lang.t("financial_status")))?;
    field(
        &mut out,
        lang.t("total_cost"),
        &lang.format_money(student.total_training_cost),
    )?;
    field(
        &mut out,
        lang.t("amount_paid"),
        &lang.format_money(finance::total_paid(student.id, payments)),
    )?;
    field(
        &mut out,
        lang.t("remaining_balance"),
        &lang.format_money(finance::balance(student, payments)),
    )?;

    writeln!(out, "<h2>{}</h2>", escape_html(lang.t("attached_documents")))?;
    if documents.is_empty() {
        writeln!(out, "<p>{}</p>", escape_html(lang.t("no_documents_attached")))?;
    } else {
        writeln!(
            out,
            "<table>\n<thead><tr><th>{}</th><th>{}</th><th>{}</th></tr></thead>\n<tbody>",
            escape_html(lang.t("document_name")),
            escape_html(lang.t("file_name")),
            escape_html(lang.t("upload_date")),
        )?;
        for doc in documents {
            writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&doc.name),
                escape_html(&doc.file_name),
                escape_html(&lang.format_date(doc.upload_date)),
            )?;
        }
        out.push_str("</tbody>\n</table>\n");
    }

    close_document(&mut out);
    Ok(out)
}

/// Loads a payment and renders its receipt.
pub async fn payment_receipt(
    db: &DatabaseConnection,
    config: &AppConfig,
    payment_id: i64,
    print_date: NaiveDate,
) -> Result<String> {
    let payment = finance::get_payment_by_id(db, payment_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "payment",
            id: payment_id,
        })?;
    let student = student::get_student_by_id(db, payment.student_id).await?;
    let ctx = PrintContext::load(db, config, print_date).await?;
    payment_receipt_html(&ctx, &payment, student.as_ref().map(|s| s.name.as_str()))
}

/// Loads a student with payments and documents and renders the file.
pub async fn student_file(
    db: &DatabaseConnection,
    config: &AppConfig,
    student_id: i64,
    print_date: NaiveDate,
) -> Result<String> {
    let student = student::get_student_by_id(db, student_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "student",
            id: student_id,
        })?;
    let payments = finance::get_payments_for_student(db, student_id).await?;
    let documents = student::get_documents_for_student(db, student_id).await?;
    let ctx = PrintContext::load(db, config, print_date).await?;
    student_file_html(&ctx, &student, &payments, &documents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn ctx(lang: Language) -> PrintContext {
        PrintContext {
            lang,
            school_name: "Najah".to_string(),
            school_address: String::new(),
            print_date: NaiveDate::from_ymd_opt(2024, 7, 25).unwrap(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("أحمد"), "أحمد");
    }

    #[tokio::test]
    async fn test_receipt_contains_payment_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Ahmed").await?;
        let payment = create_test_payment(&db, student.id, 1500.0).await?;

        let html = payment_receipt_html(&ctx(Language::French), &payment, Some("Ahmed"))?;
        assert!(html.contains("<html lang=\"fr\" dir=\"ltr\">"));
        assert!(html.contains("Ahmed"));
        assert!(html.contains(&Language::French.format_money(1500.0)));
        assert!(html.contains("01/07/2024"));
        Ok(())
    }

    #[tokio::test]
    async fn test_receipt_for_deleted_student_says_unknown() -> Result<()> {
        let db = setup_test_db().await?;
        let payment = create_test_payment(&db, 42, 300.0).await?;
        let today = ctx(Language::Arabic).print_date;
        let html = payment_receipt(&db, &AppConfig::default(), payment.id, today).await?;
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains(Language::Arabic.t("unknown")));
        Ok(())
    }

    #[tokio::test]
    async fn test_student_file_escapes_and_lists_documents() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new = test_new_student("<script>alert(1)</script>");
        new.total_training_cost = 3500.0;
        let student = student::create_student(&db, new).await?;
        create_test_payment(&db, student.id, 1500.0).await?;
        let day = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        student::attach_document(&db, student.id, "National ID", "cin.pdf", day).await?;

        let html = student_file(&db, &AppConfig::default(), student.id, day).await?;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("cin.pdf"));
        assert!(html.contains(&Language::Arabic.format_money(2000.0)));
        Ok(())
    }

    #[tokio::test]
    async fn test_student_file_without_documents() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Fatima").await?;
        let html = student_file_html(&ctx(Language::French), &student, &[], &[])?;
        assert!(html.contains(Language::French.t("no_documents_attached")));
        assert!(!html.contains("<table>"));
        Ok(())
    }
}

//! Finance business logic - Handles payments, expenses and the derived totals.
//!
//! Totals and balances are never stored. The pure functions below work over slices so
//! the bot and the printable documents can share them; the `*_summary` wrappers reload
//! current state from the database on every call.

use crate::{
    core::{ids::next_id, student, validate},
    entities::{
        Expense, ExpenseCategory, ExpenseColumn, Payment, PaymentColumn, expense, payment,
        student::Model as StudentModel,
    },
    errors::{Error, Result},
    i18n::Language,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// Fields required to record a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    /// Student who paid
    pub student_id: i64,
    /// Positive amount in dinars
    pub amount: f64,
    /// Day the money changed hands
    pub date: NaiveDate,
    /// Required, e.g. "first installment"
    pub description: String,
}

/// Fields an edit may change. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default)]
pub struct PaymentChanges {
    /// Moves the payment to another student
    pub student_id: Option<i64>,
    /// New amount, must stay positive
    pub amount: Option<f64>,
    /// Day the money changed hands
    pub date: Option<NaiveDate>,
    /// Cannot be set to blank
    pub description: Option<String>,
}

impl PaymentChanges {
    /// True when the edit would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.student_id.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

/// Fields required to record an expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Expense category
    pub category: ExpenseCategory,
    /// Positive amount in dinars
    pub amount: f64,
    /// Day the money changed hands
    pub date: NaiveDate,
    /// Required
    pub description: String,
}

/// Fields an edit may change.
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    /// Expense category
    pub category: Option<ExpenseCategory>,
    /// New amount, must stay positive
    pub amount: Option<f64>,
    /// Day the money changed hands
    pub date: Option<NaiveDate>,
    /// Cannot be set to blank
    pub description: Option<String>,
}

impl ExpenseChanges {
    /// True when the edit would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum of all payment amounts.
#[must_use]
pub fn total_income(payments: &[payment::Model]) -> f64 {
    payments.iter().map(|p| p.amount).sum()
}

/// Sum of all expense amounts.
#[must_use]
pub fn total_expenses(expenses: &[expense::Model]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Income minus expenses. Negative when the school lost money.
#[must_use]
pub fn net_profit(payments: &[payment::Model], expenses: &[expense::Model]) -> f64 {
    total_income(payments) - total_expenses(expenses)
}

/// Sum of the payments made by one student.
#[must_use]
pub fn total_paid(student_id: i64, payments: &[payment::Model]) -> f64 {
    payments
        .iter()
        .filter(|p| p.student_id == student_id)
        .map(|p| p.amount)
        .sum()
}

/// What the student still owes. Negative when they overpaid.
#[must_use]
pub fn balance(student: &StudentModel, payments: &[payment::Model]) -> f64 {
    student.total_training_cost - total_paid(student.id, payments)
}

/// Name to show for a payment's student, falling back to the "deleted student" label.
#[must_use]
pub fn payer_label(student_id: i64, names: &HashMap<i64, String>, lang: Language) -> String {
    names
        .get(&student_id)
        .cloned()
        .unwrap_or_else(|| lang.t("deleted_student").to_string())
}

/// Income, expenses and profit at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinanceSummary {
    /// Sum of every payment
    pub total_income: f64,
    /// Sum of every expense
    pub total_expenses: f64,
    /// Income minus expenses
    pub net_profit: f64,
}

impl FinanceSummary {
    /// Totals computed from the given records.
    #[must_use]
    pub fn from_records(payments: &[payment::Model], expenses: &[expense::Model]) -> Self {
        let income = total_income(payments);
        let spent = total_expenses(expenses);
        Self {
            total_income: income,
            total_expenses: spent,
            net_profit: income - spent,
        }
    }
}

/// Recomputes the summary from the current payments and expenses.
pub async fn finance_summary(db: &DatabaseConnection) -> Result<FinanceSummary> {
    let payments = get_all_payments(db).await?;
    let expenses = get_all_expenses(db).await?;
    Ok(FinanceSummary::from_records(&payments, &expenses))
}

/// Payment joined with its student's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    /// The stored payment
    pub payment: payment::Model,
    /// Name of the paying student, or a placeholder if deleted
    pub student_name: String,
}

/// Lists payments with their student names resolved.
pub async fn payment_rows(db: &DatabaseConnection, lang: Language) -> Result<Vec<PaymentRow>> {
    let names = student::student_names(db).await?;
    Ok(get_all_payments(db)
        .await?
        .into_iter()
        .map(|payment| PaymentRow {
            student_name: payer_label(payment.student_id, &names, lang),
            payment,
        })
        .collect())
}

/// Amount paid and remaining for one student.
pub async fn student_balance(db: &DatabaseConnection, student_id: i64) -> Result<(f64, f64)> {
    let student = student::get_student_by_id(db, student_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "student",
            id: student_id,
        })?;
    let payments = get_payments_for_student(db, student_id).await?;
    Ok((total_paid(student_id, &payments), balance(&student, &payments)))
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// Retrieves every payment in creation order.
pub async fn get_all_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    Payment::find()
        .order_by_asc(PaymentColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a payment by id.
pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    payment_id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Payments made by one student, oldest first.
pub async fn get_payments_for_student(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(PaymentColumn::StudentId.eq(student_id))
        .order_by_asc(PaymentColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a payment with the next free id. The student id is not checked.
pub async fn create_payment(db: &DatabaseConnection, new: NewPayment) -> Result<payment::Model> {
    let amount = validate::amount(new.amount)?;
    let description = validate::required("Description", &new.description)?;

    let id = next_id::<Payment, _>(db, PaymentColumn::Id).await?;
    let payment = payment::ActiveModel {
        id: Set(id),
        student_id: Set(new.student_id),
        amount: Set(amount),
        date: Set(new.date),
        description: Set(description),
    };

    let result = payment.insert(db).await?;
    info!(
        "Recorded payment #{} of {:.2} from student #{}",
        result.id, result.amount, result.student_id
    );
    Ok(result)
}

/// Applies `changes` to a payment. A blank description or a non-positive amount is rejected.
pub async fn update_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    changes: PaymentChanges,
) -> Result<payment::Model> {
    let existing = get_payment_by_id(db, payment_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "payment",
            id: payment_id,
        })?;

    if changes.is_empty() {
        return Ok(existing);
    }

    let mut active_model: payment::ActiveModel = existing.into();
    if let Some(student_id) = changes.student_id {
        active_model.student_id = Set(student_id);
    }
    if let Some(amount) = changes.amount {
        active_model.amount = Set(validate::amount(amount)?);
    }
    if let Some(date) = changes.date {
        active_model.date = Set(date);
    }
    if let Some(description) = changes.description {
        active_model.description = Set(validate::required("Description", &description)?);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a payment and returns it.
pub async fn delete_payment(db: &DatabaseConnection, payment_id: i64) -> Result<payment::Model> {
    let existing = get_payment_by_id(db, payment_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "payment",
            id: payment_id,
        })?;

    Payment::delete_by_id(payment_id).exec(db).await?;
    info!("Deleted payment #{payment_id}");
    Ok(existing)
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

/// Retrieves every expense in creation order.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    Expense::find()
        .order_by_asc(ExpenseColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an expense by id.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records an expense. The amount must be positive and the description non-blank.
pub async fn create_expense(db: &DatabaseConnection, new: NewExpense) -> Result<expense::Model> {
    let amount = validate::amount(new.amount)?;
    let description = validate::required("Description", &new.description)?;

    let id = next_id::<Expense, _>(db, ExpenseColumn::Id).await?;
    let expense = expense::ActiveModel {
        id: Set(id),
        category: Set(new.category),
        amount: Set(amount),
        date: Set(new.date),
        description: Set(description),
    };

    let result = expense.insert(db).await?;
    info!(
        "Recorded {:?} expense #{} of {:.2}",
        result.category, result.id, result.amount
    );
    Ok(result)
}

/// Applies `changes` to an expense, with the same checks as creation.
pub async fn update_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    changes: ExpenseChanges,
) -> Result<expense::Model> {
    let existing = get_expense_by_id(db, expense_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "expense",
            id: expense_id,
        })?;

    if changes.is_empty() {
        return Ok(existing);
    }

    let mut active_model: expense::ActiveModel = existing.into();
    if let Some(category) = changes.category {
        active_model.category = Set(category);
    }
    if let Some(amount) = changes.amount {
        active_model.amount = Set(validate::amount(amount)?);
    }
    if let Some(date) = changes.date {
        active_model.date = Set(date);
    }
    if let Some(description) = changes.description {
        active_model.description = Set(validate::required("Description", &description)?);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an expense and returns it.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<expense::Model> {
    let existing = get_expense_by_id(db, expense_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "expense",
            id: expense_id,
        })?;

    Expense::delete_by_id(expense_id).exec(db).await?;
    info!("Deleted expense #{expense_id}");
    Ok(existing)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_balance_after_full_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new = test_new_student("Ahmed");
        new.total_training_cost = 3500.0;
        let ahmed = student::create_student(&db, new).await?;
        create_test_payment(&db, ahmed.id, 1500.0).await?;
        create_test_payment(&db, ahmed.id, 2000.0).await?;

        let payments = get_all_payments(&db).await?;
        assert_eq!(total_paid(ahmed.id, &payments), 3500.0);
        assert_eq!(balance(&ahmed, &payments), 0.0);
        assert_eq!(student_balance(&db, ahmed.id).await?, (3500.0, 0.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_balance_ignores_other_students() -> Result<()> {
        let db = setup_test_db().await?;
        let ahmed = create_test_student(&db, "Ahmed").await?;
        let fatima = create_test_student(&db, "Fatima").await?;
        create_test_payment(&db, fatima.id, 1000.0).await?;

        let payments = get_all_payments(&db).await?;
        assert_eq!(total_paid(ahmed.id, &payments), 0.0);
        assert_eq!(balance(&ahmed, &payments), ahmed.total_training_cost);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_of_empty_books_is_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let summary = finance_summary(&db).await?;
        assert_eq!(
            summary,
            FinanceSummary {
                total_income: 0.0,
                total_expenses: 0.0,
                net_profit: 0.0,
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_net_profit_can_be_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Ahmed").await?;
        create_test_payment(&db, student.id, 1500.0).await?;
        create_test_expense(&db, 25000.0).await?;

        let summary = finance_summary(&db).await?;
        assert_eq!(summary.total_income, 1500.0);
        assert_eq!(summary.total_expenses, 25000.0);
        assert_eq!(summary.net_profit, -23500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_for_deleted_student_is_labelled() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Ahmed").await?;
        create_test_payment(&db, student.id, 1500.0).await?;
        student::delete_student(&db, student.id).await?;

        let rows = payment_rows(&db, Language::French).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_name, Language::French.t("deleted_student"));
        assert_eq!(finance_summary(&db).await?.total_income, 1500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_payment(
            &db,
            NewPayment {
                student_id: 1,
                amount: -5.0,
                date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                description: String::new(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));
        assert!(get_all_payments(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_description_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let payment = create_payment(
            &db,
            NewPayment {
                student_id: 1,
                amount: 500.0,
                date: day,
                description: "  ".to_string(),
            },
        )
        .await;
        assert!(matches!(payment, Err(Error::Validation { message: _ })));

        let expense = create_expense(
            &db,
            NewExpense {
                category: ExpenseCategory::Rent,
                amount: 4000.0,
                date: day,
                description: String::new(),
            },
        )
        .await;
        assert!(matches!(expense, Err(Error::Validation { message: _ })));

        assert!(get_all_payments(&db).await?.is_empty());
        assert!(get_all_expenses(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_cannot_blank_description() -> Result<()> {
        let db = setup_test_db().await?;
        let payment = create_test_payment(&db, 1, 1500.0).await?;
        let expense = create_test_expense(&db, 800.0).await?;

        let result = update_payment(
            &db,
            payment.id,
            PaymentChanges {
                description: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = update_expense(
            &db,
            expense.id,
            ExpenseChanges {
                description: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        assert_eq!(get_payment_by_id(&db, payment.id).await?.unwrap(), payment);
        assert_eq!(get_expense_by_id(&db, expense.id).await?.unwrap(), expense);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_amount_only() -> Result<()> {
        let db = setup_test_db().await?;
        let expense = create_test_expense(&db, 800.0).await?;
        let updated = update_expense(
            &db,
            expense.id,
            ExpenseChanges {
                amount: Some(950.0),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.amount, 950.0);
        assert_eq!(updated.category, expense.category);
        assert_eq!(updated.description, expense.description);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_payment_then_ids_continue() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_payment(&db, 1, 100.0).await?;
        let second = create_test_payment(&db, 1, 200.0).await?;
        delete_payment(&db, first.id).await?;
        let third = create_test_payment(&db, 1, 300.0).await?;
        assert_eq!(third.id, second.id + 1);
        Ok(())
    }
}

//! Loads the sample records into an empty database.

use crate::{
    config::seed::SeedData,
    entities::{Expense, Instructor, Lesson, Payment, Student, StudentDocument, Vehicle},
    errors::Result,
};
use sea_orm::{IntoActiveModel, TransactionTrait, prelude::*};
use tracing::info;

async fn insert_all<E, C>(db: &C, models: Vec<E::Model>) -> Result<usize>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    C: ConnectionTrait,
{
    let count = models.len();
    for model in models {
        E::insert(model.into_active_model()).exec(db).await?;
    }
    Ok(count)
}

/// Inserts `seed` with its ids unchanged, unless students already exist.
///
/// Returns whether anything was loaded. Everything is inserted in one transaction.
pub async fn seed_if_empty(db: &DatabaseConnection, seed: SeedData) -> Result<bool> {
    if Student::find().count(db).await? > 0 {
        info!("Students already present, skipping sample data");
        return Ok(false);
    }

    let txn = db.begin().await?;
    let students = insert_all::<Student, _>(&txn, seed.students).await?;
    let documents = insert_all::<StudentDocument, _>(&txn, seed.documents).await?;
    let instructors = insert_all::<Instructor, _>(&txn, seed.instructors).await?;
    let vehicles = insert_all::<Vehicle, _>(&txn, seed.vehicles).await?;
    let lessons = insert_all::<Lesson, _>(&txn, seed.lessons).await?;
    let payments = insert_all::<Payment, _>(&txn, seed.payments).await?;
    let expenses = insert_all::<Expense, _>(&txn, seed.expenses).await?;
    txn.commit().await?;

    info!(
        "Loaded sample data: {students} students, {documents} documents, {instructors} instructors, \
         {vehicles} vehicles, {lessons} lessons, {payments} payments, {expenses} expenses"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::seed::load_seed;
    use crate::core::{finance, instructor, schedule, student, vehicle};
    use crate::i18n::Language;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_seed_loads_sample_records() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(seed_if_empty(&db, load_seed()?).await?);

        let ahmed = student::get_student_by_id(&db, 1).await?.unwrap();
        assert_eq!(student::get_documents_for_student(&db, 1).await?.len(), 2);
        let payments = finance::get_all_payments(&db).await?;
        assert_eq!(finance::balance(&ahmed, &payments), 0.0);

        let summary = finance::finance_summary(&db).await?;
        assert_eq!(summary.total_income, 7000.0);
        assert_eq!(summary.total_expenses, 37000.0);
        assert_eq!(summary.net_profit, -30000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skipped_when_students_exist() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_student(&db, "Ahmed").await?;
        assert!(!seed_if_empty(&db, load_seed()?).await?);
        assert_eq!(student::get_all_students(&db).await?.len(), 1);
        assert!(finance::get_all_payments(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_ids_continue_after_seed() -> Result<()> {
        let db = setup_test_db().await?;
        seed_if_empty(&db, load_seed()?).await?;
        let new = create_test_student(&db, "Sara").await?;
        assert_eq!(new.id, 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_seeded_schedule_and_assignments() -> Result<()> {
        let db = setup_test_db().await?;
        seed_if_empty(&db, load_seed()?).await?;

        let grid = schedule::weekly_schedule(&db, None).await?;
        // Monday 09:00 and 10:00, Tuesday 18:00
        assert_eq!(grid.cell(1, 0).unwrap().lesson_id, 1);
        assert_eq!(grid.cell(2, 0).unwrap().lesson_id, 2);
        assert_eq!(grid.cell(10, 1).unwrap().lesson_id, 3);

        let karim = instructor::get_instructor_by_id(&db, 1).await?.unwrap();
        let vehicles = vehicle::get_all_vehicles(&db).await?;
        assert_eq!(
            vehicle::assigned_vehicle_label(karim.assigned_vehicle_id, &vehicles, Language::French),
            "Renault Clio (123-A-45)"
        );
        Ok(())
    }
}

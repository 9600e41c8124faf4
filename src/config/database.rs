//! Database configuration module for `DriveBuddy`.
//!
//! All collections live in a `SQLite` database that defaults to `sqlite::memory:`, so
//! the school's records exist only for the lifetime of the process and are re-seeded on
//! every start. Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, keeping the schema in lockstep with the Rust
//! structs without hand-written SQL.

use crate::entities::{Expense, Instructor, Lesson, Payment, Setting, Student, StudentDocument, Vehicle};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Connection string used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back to
/// an in-memory `SQLite` database.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");
    let mut options = ConnectOptions::new(database_url.clone());
    // Every connection to `:memory:` opens its own empty database
    if database_url.contains(":memory:") {
        options.max_connections(1);
    }
    Database::connect(options).await.map_err(Into::into)
}

/// Creates every table from its entity definition.
///
/// Students must exist before documents because documents carry a foreign key to their
/// owner. No other table references another one at the schema level: payments, lessons
/// and instructors may point at deleted records.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statements = [
        schema.create_table_from_entity(Student),
        schema.create_table_from_entity(StudentDocument),
        schema.create_table_from_entity(Instructor),
        schema.create_table_from_entity(Vehicle),
        schema.create_table_from_entity(Lesson),
        schema.create_table_from_entity(Payment),
        schema.create_table_from_entity(Expense),
        schema.create_table_from_entity(Setting),
    ];

    for statement in &statements {
        db.execute(builder.build(statement)).await?;
    }

    info!("Created {} tables", statements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ExpenseModel, InstructorModel, LessonModel, PaymentModel, SettingModel, StudentDocumentModel,
        StudentModel, VehicleModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Every table answers a query once created
        let _: Vec<StudentModel> = Student::find().limit(1).all(&db).await?;
        let _: Vec<StudentDocumentModel> = StudentDocument::find().limit(1).all(&db).await?;
        let _: Vec<InstructorModel> = Instructor::find().limit(1).all(&db).await?;
        let _: Vec<VehicleModel> = Vehicle::find().limit(1).all(&db).await?;
        let _: Vec<LessonModel> = Lesson::find().limit(1).all(&db).await?;
        let _: Vec<PaymentModel> = Payment::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        let _: Vec<SettingModel> = Setting::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_default_database_is_in_memory() {
        assert_eq!(DEFAULT_DATABASE_URL, "sqlite::memory:");
    }
}

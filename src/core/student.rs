//! Student business logic - Handles students and the documents attached to their files.
//!
//! Students are listed in creation order. Deleting a student removes its documents with
//! it but leaves payments and lessons that mention it untouched; those render with a
//! placeholder label instead.

use crate::{
    core::{ids::next_id, validate},
    entities::{
        LicenseType, Student, StudentColumn, StudentDocument, StudentDocumentColumn,
        StudentStatus, student, student_document,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// Fields required to register a student.
#[derive(Debug, Clone)]
pub struct NewStudent {
    /// Full name, required
    pub name: String,
    /// Postal address, may be empty
    pub address: String,
    /// Phone number, required
    pub phone: String,
    /// National identity card number, required
    pub national_id: String,
    /// License category
    pub license_type: LicenseType,
    /// Current status
    pub status: StudentStatus,
    /// Agreed price of the whole training
    pub total_training_cost: f64,
    /// Defaults to today when absent
    pub registration_date: Option<NaiveDate>,
}

/// Fields an edit may change. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    /// Full name
    pub name: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Cannot be set to blank
    pub phone: Option<String>,
    /// National identity card number
    pub national_id: Option<String>,
    /// License category
    pub license_type: Option<LicenseType>,
    /// Current status
    pub status: Option<StudentStatus>,
    /// Agreed price of the training
    pub total_training_cost: Option<f64>,
}

impl StudentChanges {
    /// True when the edit would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.national_id.is_none()
            && self.license_type.is_none()
            && self.status.is_none()
            && self.total_training_cost.is_none()
    }
}

/// Retrieves every student in creation order.
pub async fn get_all_students(db: &DatabaseConnection) -> Result<Vec<student::Model>> {
    Student::find()
        .order_by_asc(StudentColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a student by id, returning None if it does not exist.
pub async fn get_student_by_id(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Option<student::Model>> {
    Student::find_by_id(student_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Case-insensitive search on name or national id. An empty term matches everyone.
pub async fn search_students(db: &DatabaseConnection, term: &str) -> Result<Vec<student::Model>> {
    let needle = term.trim().to_lowercase();
    let students = get_all_students(db).await?;
    if needle.is_empty() {
        return Ok(students);
    }

    Ok(students
        .into_iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.national_id.to_lowercase().contains(&needle)
        })
        .collect())
}

/// Maps student ids to names for labelling joins.
pub async fn student_names(db: &DatabaseConnection) -> Result<HashMap<i64, String>> {
    Ok(get_all_students(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect())
}

/// Registers a new student with the next free id.
pub async fn create_student(db: &DatabaseConnection, new: NewStudent) -> Result<student::Model> {
    let name = validate::required("Student name", &new.name)?;
    let national_id = validate::required("National id", &new.national_id)?;
    let phone = validate::required("Phone", &new.phone)?;
    let total_training_cost = validate::amount(new.total_training_cost)?;
    let registration_date = new
        .registration_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let id = next_id::<Student, _>(db, StudentColumn::Id).await?;
    let student = student::ActiveModel {
        id: Set(id),
        name: Set(name),
        address: Set(new.address.trim().to_string()),
        phone: Set(phone),
        national_id: Set(national_id),
        license_type: Set(new.license_type),
        status: Set(new.status),
        registration_date: Set(registration_date),
        total_training_cost: Set(total_training_cost),
    };

    let result = student.insert(db).await?;
    info!("Created student #{} ({})", result.id, result.name);
    Ok(result)
}

/// Applies the fields present in `changes`; id, registration date and documents are
/// never touched.
pub async fn update_student(
    db: &DatabaseConnection,
    student_id: i64,
    changes: StudentChanges,
) -> Result<student::Model> {
    let existing = get_student_by_id(db, student_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "student",
            id: student_id,
        })?;

    if changes.is_empty() {
        return Ok(existing);
    }

    let mut active_model: student::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        active_model.name = Set(validate::required("Student name", &name)?);
    }
    if let Some(address) = changes.address {
        active_model.address = Set(address.trim().to_string());
    }
    if let Some(phone) = changes.phone {
        active_model.phone = Set(validate::required("Phone", &phone)?);
    }
    if let Some(national_id) = changes.national_id {
        active_model.national_id = Set(validate::required("National id", &national_id)?);
    }
    if let Some(license_type) = changes.license_type {
        active_model.license_type = Set(license_type);
    }
    if let Some(status) = changes.status {
        active_model.status = Set(status);
    }
    if let Some(cost) = changes.total_training_cost {
        active_model.total_training_cost = Set(validate::amount(cost)?);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a student together with its documents. Payments and lessons are kept.
pub async fn delete_student(db: &DatabaseConnection, student_id: i64) -> Result<student::Model> {
    let existing = get_student_by_id(db, student_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "student",
            id: student_id,
        })?;

    let txn = db.begin().await?;
    StudentDocument::delete_many()
        .filter(StudentDocumentColumn::StudentId.eq(student_id))
        .exec(&txn)
        .await?;
    Student::delete_by_id(student_id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted student #{student_id}");
    Ok(existing)
}

/// Retrieves a student's documents in the order they were attached.
pub async fn get_documents_for_student(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Vec<student_document::Model>> {
    StudentDocument::find()
        .filter(StudentDocumentColumn::StudentId.eq(student_id))
        .order_by_asc(StudentDocumentColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attaches a document to a student's file. Both the document name and the uploaded
/// file's name are required; nothing is stored when either is missing.
pub async fn attach_document(
    db: &DatabaseConnection,
    student_id: i64,
    name: &str,
    file_name: &str,
    upload_date: NaiveDate,
) -> Result<student_document::Model> {
    if name.trim().is_empty() || file_name.trim().is_empty() {
        return Err(Error::validation(
            "A document needs both a name and a file",
        ));
    }

    if get_student_by_id(db, student_id).await?.is_none() {
        return Err(Error::NotFound {
            entity: "student",
            id: student_id,
        });
    }

    let id = next_id::<StudentDocument, _>(db, StudentDocumentColumn::Id).await?;
    let document = student_document::ActiveModel {
        id: Set(id),
        student_id: Set(student_id),
        name: Set(name.trim().to_string()),
        file_name: Set(file_name.trim().to_string()),
        upload_date: Set(upload_date),
    };

    document.insert(db).await.map_err(Into::into)
}

/// Removes one document from a student's file.
pub async fn remove_document(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<student_document::Model> {
    let existing = StudentDocument::find_by_id(document_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "document",
            id: document_id,
        })?;

    StudentDocument::delete_by_id(document_id).exec(db).await?;
    Ok(existing)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_student(&db, "Ahmed").await?;
        let second = create_test_student(&db, "Fatima").await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_id_not_reused_unless_max() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_student(&db, "One").await?;
        create_test_student(&db, "Two").await?;
        create_test_student(&db, "Three").await?;

        // Deleting a middle record keeps max at 3
        delete_student(&db, 2).await?;
        let fourth = create_test_student(&db, "Four").await?;
        assert_eq!(fourth.id, 4);

        // Deleting the max frees its id
        delete_student(&db, 4).await?;
        let again = create_test_student(&db, "Again").await?;
        assert_eq!(again.id, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let mut new = test_new_student("   ");
        let result = create_student(&db, new.clone()).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        new.name = "Youssef".to_string();
        new.total_training_cost = -5.0;
        let result = create_student(&db, new).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        assert!(get_all_students(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_phone_required_address_optional() -> Result<()> {
        let db = setup_test_db().await?;

        let mut new = test_new_student("Omar");
        new.phone = "   ".to_string();
        let result = create_student(&db, new.clone()).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        assert!(get_all_students(&db).await?.is_empty());

        new.phone = "0600000000".to_string();
        new.address = String::new();
        let omar = create_student(&db, new).await?;
        assert_eq!(omar.address, "");

        let result = update_student(
            &db,
            omar.id,
            StudentChanges {
                phone: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        assert_eq!(get_student_by_id(&db, omar.id).await?.unwrap().phone, "0600000000");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_student(&db, "Khadija").await?;

        let updated = update_student(
            &db,
            original.id,
            StudentChanges {
                phone: Some("0700000000".to_string()),
                status: Some(StudentStatus::InTraining),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.phone, "0700000000");
        assert_eq!(updated.status, StudentStatus::InTraining);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.address, original.address);
        assert_eq!(updated.national_id, original.national_id);
        assert_eq!(updated.license_type, original.license_type);
        assert_eq!(updated.registration_date, original.registration_date);
        assert_eq!(updated.total_training_cost, original.total_training_cost);

        let stored = get_student_by_id(&db, original.id).await?.unwrap();
        assert_eq!(stored, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_student() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_student(&db, 42, StudentChanges::default()).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "student",
                id: 42
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_student(&db, "Mohamed").await?;
        let same = update_student(&db, original.id, StudentChanges::default()).await?;
        assert_eq!(same, original);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_by_name_or_national_id() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new = test_new_student("Youssef Bennani");
        new.national_id = "EF11223".to_string();
        create_student(&db, new).await?;
        create_test_student(&db, "Nadia").await?;

        assert_eq!(search_students(&db, "youssef").await?.len(), 1);
        assert_eq!(search_students(&db, "ef112").await?.len(), 1);
        assert_eq!(search_students(&db, "").await?.len(), 2);
        assert!(search_students(&db, "zzz").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_documents_attach_and_remove() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Ahmed").await?;
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let cin = attach_document(&db, student.id, "National ID", "cin.pdf", today).await?;
        let medical = attach_document(&db, student.id, "Medical", "medical.pdf", today).await?;
        assert_eq!(cin.id, 1);
        assert_eq!(medical.id, 2);

        let docs = get_documents_for_student(&db, student.id).await?;
        assert_eq!(docs, vec![cin.clone(), medical.clone()]);

        remove_document(&db, cin.id).await?;
        assert_eq!(get_documents_for_student(&db, student.id).await?, vec![medical]);
        Ok(())
    }

    #[tokio::test]
    async fn test_document_requires_name_and_file() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Ahmed").await?;
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let no_file = attach_document(&db, student.id, "National ID", "", today).await;
        assert!(matches!(no_file, Err(Error::Validation { message: _ })));
        let no_name = attach_document(&db, student.id, " ", "cin.pdf", today).await;
        assert!(matches!(no_name, Err(Error::Validation { message: _ })));

        assert!(get_documents_for_student(&db, student.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_student_removes_documents_keeps_payments() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Ahmed").await?;
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        attach_document(&db, student.id, "National ID", "cin.pdf", today).await?;
        let payment = create_test_payment(&db, student.id, 1500.0).await?;

        delete_student(&db, student.id).await?;

        assert!(get_student_by_id(&db, student.id).await?.is_none());
        assert!(get_documents_for_student(&db, student.id).await?.is_empty());
        let payments = crate::core::finance::get_all_payments(&db).await?;
        assert_eq!(payments, vec![payment]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_student() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_student(&db, 7).await;
        assert!(matches!(result, Err(Error::NotFound { entity: _, id: 7 })));
        Ok(())
    }
}

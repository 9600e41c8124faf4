//! Student document entity - A paper attached to a student's file.
//!
//! Only the uploaded file's name is recorded; its contents are never kept.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_documents")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Owner of the document
    pub student_id: i64,
    /// What the document is, e.g. "Medical certificate"
    pub name: String,
    /// Name of the uploaded file
    pub file_name: String,
    /// Day the document was attached
    pub upload_date: Date,
}

/// Relations of a document
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each document belongs to one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

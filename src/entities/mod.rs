//! Entity module - Contains all SeaORM entity definitions for the school's collections.
//! Each entity has a Model struct for data and an Entity struct for operations.
//! Status and category enums are stored as text through `DeriveActiveEnum`.

/// Money spent by the school
pub mod expense;
/// Driving instructors
pub mod instructor;
/// Practical and theoretical lessons
pub mod lesson;
/// Money received from students
pub mod payment;
/// Key-value settings
pub mod setting;
/// Students and their training
pub mod student;
/// Documents attached to a student
pub mod student_document;
/// The fleet
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use expense::{Column as ExpenseColumn, Entity as Expense, ExpenseCategory, Model as ExpenseModel};
pub use instructor::{Column as InstructorColumn, Entity as Instructor, Model as InstructorModel};
pub use lesson::{
    Column as LessonColumn, Entity as Lesson, LessonStatus, LessonType, Model as LessonModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use setting::{Column as SettingColumn, Entity as Setting, Model as SettingModel};
pub use student::{
    Column as StudentColumn, Entity as Student, LicenseType, Model as StudentModel, StudentStatus,
};
pub use student_document::{
    Column as StudentDocumentColumn, Entity as StudentDocument, Model as StudentDocumentModel,
};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel, VehicleStatus};

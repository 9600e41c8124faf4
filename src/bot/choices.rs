//! Choice parameters shown as drop-downs in slash commands.
//!
//! Discord needs fixed choice names at registration time, so each choice carries a
//! bilingual name; the selected value maps onto the stored entity enum.

#![allow(missing_docs)]

use crate::{
    entities::{
        ExpenseCategory, LessonStatus, LessonType, LicenseType, StudentStatus, VehicleStatus,
    },
    i18n::Language,
};

/// License category offered as a slash command choice
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum LicenseChoice {
    /// Motorcycle
    #[name = "A"]
    A,
    /// Car
    #[name = "B"]
    B,
    /// Truck
    #[name = "C"]
    C,
    /// Bus
    #[name = "D"]
    D,
    /// Heavy vehicle with trailer
    #[name = "E"]
    E,
}

impl From<LicenseChoice> for LicenseType {
    fn from(choice: LicenseChoice) -> Self {
        match choice {
            LicenseChoice::A => Self::A,
            LicenseChoice::B => Self::B,
            LicenseChoice::C => Self::C,
            LicenseChoice::D => Self::D,
            LicenseChoice::E => Self::E,
        }
    }
}

/// Training status choice
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum StudentStatusChoice {
    /// File opened, training not started
    #[name = "ملف مفتوح / Dossier ouvert"]
    Open,
    /// Taking lessons
    #[name = "في التكوين / En formation"]
    InTraining,
    /// Sat the exam, result pending
    #[name = "اجتاز الامتحان / Examen passé"]
    PassedExam,
    /// Licence obtained
    #[name = "ناجح / Réussi"]
    Successful,
    /// Failed the exam
    #[name = "راسب / Échoué"]
    Failed,
}

impl From<StudentStatusChoice> for StudentStatus {
    fn from(choice: StudentStatusChoice) -> Self {
        match choice {
            StudentStatusChoice::Open => Self::Open,
            StudentStatusChoice::InTraining => Self::InTraining,
            StudentStatusChoice::PassedExam => Self::PassedExam,
            StudentStatusChoice::Successful => Self::Successful,
            StudentStatusChoice::Failed => Self::Failed,
        }
    }
}

/// Vehicle status choice
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum VehicleStatusChoice {
    /// Ready for lessons
    #[name = "متوفرة / Disponible"]
    Available,
    /// At the garage
    #[name = "صيانة / En maintenance"]
    Maintenance,
    /// Withdrawn
    #[name = "خارج الخدمة / Hors service"]
    OutOfService,
}

impl From<VehicleStatusChoice> for VehicleStatus {
    fn from(choice: VehicleStatusChoice) -> Self {
        match choice {
            VehicleStatusChoice::Available => Self::Available,
            VehicleStatusChoice::Maintenance => Self::Maintenance,
            VehicleStatusChoice::OutOfService => Self::OutOfService,
        }
    }
}

/// Practical or theoretical
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum LessonTypeChoice {
    /// Driving with an instructor
    #[name = "تطبيقي / Pratique"]
    Practical,
    /// Classroom session
    #[name = "نظري / Théorique"]
    Theoretical,
}

impl From<LessonTypeChoice> for LessonType {
    fn from(choice: LessonTypeChoice) -> Self {
        match choice {
            LessonTypeChoice::Practical => Self::Practical,
            LessonTypeChoice::Theoretical => Self::Theoretical,
        }
    }
}

/// Lesson status choice
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum LessonStatusChoice {
    /// Planned
    #[name = "مجدولة / Programmée"]
    Scheduled,
    /// Held
    #[name = "مكتملة / Terminée"]
    Completed,
    /// Called off
    #[name = "ملغاة / Annulée"]
    Cancelled,
}

impl From<LessonStatusChoice> for LessonStatus {
    fn from(choice: LessonStatusChoice) -> Self {
        match choice {
            LessonStatusChoice::Scheduled => Self::Scheduled,
            LessonStatusChoice::Completed => Self::Completed,
            LessonStatusChoice::Cancelled => Self::Cancelled,
        }
    }
}

/// Expense category choice
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum ExpenseCategoryChoice {
    /// At the garage
    #[name = "صيانة / Maintenance"]
    Maintenance,
    /// Staff pay
    #[name = "رواتب / Salaires"]
    Salaries,
    /// Premises rent
    #[name = "كراء / Loyer"]
    Rent,
    /// Water, electricity, phone
    #[name = "فواتير / Factures"]
    Bills,
    #[name = "أخرى / Autre"]
    Other,
}

impl From<ExpenseCategoryChoice> for ExpenseCategory {
    fn from(choice: ExpenseCategoryChoice) -> Self {
        match choice {
            ExpenseCategoryChoice::Maintenance => Self::Maintenance,
            ExpenseCategoryChoice::Salaries => Self::Salaries,
            ExpenseCategoryChoice::Rent => Self::Rent,
            ExpenseCategoryChoice::Bills => Self::Bills,
            ExpenseCategoryChoice::Other => Self::Other,
        }
    }
}

/// Interface language choice
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum LanguageChoice {
    /// Right to left
    #[name = "العربية"]
    Arabic,
    /// Left to right
    #[name = "Français"]
    French,
}

impl From<LanguageChoice> for Language {
    fn from(choice: LanguageChoice) -> Self {
        match choice {
            LanguageChoice::Arabic => Self::Arabic,
            LanguageChoice::French => Self::French,
        }
    }
}

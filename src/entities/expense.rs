//! Expense entity - Money spent running the school.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bookkeeping category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Vehicle repairs and servicing
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    /// Instructor pay
    #[sea_orm(string_value = "salaries")]
    Salaries,
    /// Premises rent
    #[sea_orm(string_value = "rent")]
    Rent,
    /// Utilities
    #[sea_orm(string_value = "bills")]
    Bills,
    /// Anything else
    #[sea_orm(string_value = "other")]
    Other,
}

impl ExpenseCategory {
    /// Translation key for the category label
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Maintenance => "category_maintenance",
            Self::Salaries => "category_salaries",
            Self::Rent => "category_rent",
            Self::Bills => "category_bills",
            Self::Other => "category_other",
        }
    }
}

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// What kind of expense this is
    pub category: ExpenseCategory,
    /// Amount spent
    pub amount: f64,
    /// Day of the expense
    pub date: Date,
    /// What the money was spent on
    pub description: String,
}

/// Expenses stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

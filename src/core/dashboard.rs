//! Dashboard statistics - Headline figures derived from every collection.

use crate::{
    core::{finance, instructor, student, vehicle},
    entities::{
        StudentStatus, VehicleStatus, instructor::Model as InstructorModel,
        payment::Model as PaymentModel, student::Model as StudentModel,
        vehicle::Model as VehicleModel,
    },
    errors::Result,
};
use chrono::{Datelike, NaiveDate};
use sea_orm::DatabaseConnection;

/// Number of months shown in the income chart, current month included.
pub const INCOME_MONTHS: u32 = 6;

/// Income received during one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyIncome {
    /// Calendar year
    pub year: i32,
    /// 1 to 12
    pub month: u32,
    /// Sum of the payments that month
    pub amount: f64,
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Every registered student, whatever the status
    pub total_students: usize,
    /// Instructors on staff
    pub instructors: usize,
    /// Vehicles not in maintenance or out of service
    pub available_vehicles: usize,
    /// Income of the month containing `today`
    pub monthly_income: f64,
    /// Oldest month first
    pub income_by_month: Vec<MonthlyIncome>,
    /// Students who passed
    pub successful: usize,
    /// Students who failed
    pub failed: usize,
}

impl DashboardStats {
    /// Share of exam outcomes that were successful, in percent. Zero without outcomes.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        let outcomes = self.successful + self.failed;
        if outcomes == 0 {
            return 0.0;
        }
        // Cast safety: counts of students stay far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let rate = self.successful as f64 * 100.0 / outcomes as f64;
        rate
    }
}

/// `(year, month)` pairs for the `count` months ending with the month of `today`.
fn trailing_months(today: NaiveDate, count: u32) -> Vec<(i32, u32)> {
    let (mut year, mut month) = (today.year(), today.month());
    let mut months = Vec::new();
    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
}

fn income_in(payments: &[PaymentModel], year: i32, month: u32) -> f64 {
    payments
        .iter()
        .filter(|p| p.date.year() == year && p.date.month() == month)
        .map(|p| p.amount)
        .sum()
}

/// Computes the dashboard figures from loaded records.
#[must_use]
pub fn compute_stats(
    students: &[StudentModel],
    instructors: &[InstructorModel],
    vehicles: &[VehicleModel],
    payments: &[PaymentModel],
    today: NaiveDate,
) -> DashboardStats {
    let income_by_month: Vec<MonthlyIncome> = trailing_months(today, INCOME_MONTHS)
        .into_iter()
        .map(|(year, month)| MonthlyIncome {
            year,
            month,
            amount: income_in(payments, year, month),
        })
        .collect();

    DashboardStats {
        total_students: students.len(),
        instructors: instructors.len(),
        available_vehicles: vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .count(),
        monthly_income: income_in(payments, today.year(), today.month()),
        income_by_month,
        successful: students
            .iter()
            .filter(|s| s.status == StudentStatus::Successful)
            .count(),
        failed: students
            .iter()
            .filter(|s| s.status == StudentStatus::Failed)
            .count(),
    }
}

/// Loads every collection and computes the dashboard for `today`.
pub async fn dashboard_stats(db: &DatabaseConnection, today: NaiveDate) -> Result<DashboardStats> {
    let students = student::get_all_students(db).await?;
    let instructors = instructor::get_all_instructors(db).await?;
    let vehicles = vehicle::get_all_vehicles(db).await?;
    let payments = finance::get_all_payments(db).await?;
    Ok(compute_stats(
        &students,
        &instructors,
        &vehicles,
        &payments,
        today,
    ))
}

//! Shared input validation for create and edit operations.

use crate::errors::{Error, Result};
use chrono::NaiveDate;

/// Trims `value` and rejects it when nothing is left.
pub fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Accepts finite, non-negative amounts.
pub fn amount(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidAmount { amount: value });
    }
    Ok(value)
}

/// Accepts a plausible vehicle purchase year.
pub fn year(value: i32) -> Result<i32> {
    if !(1900..=9999).contains(&value) {
        return Err(Error::validation(format!("Invalid year: {value}")));
    }
    Ok(value)
}

/// Parses a `YYYY-MM-DD` date typed by a user.
pub fn date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        Error::validation(format!("{field} must be a date like 2024-07-22, got '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Karim ").unwrap(), "Karim");
        assert!(matches!(
            required("name", "   "),
            Err(Error::Validation { message: _ })
        ));
    }

    #[test]
    fn test_amount_rejects_negative_and_nan() {
        assert_eq!(amount(0.0).unwrap(), 0.0);
        assert!(matches!(amount(-1.0), Err(Error::InvalidAmount { amount: _ })));
        assert!(amount(f64::NAN).is_err());
        assert!(amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_date_parsing() {
        assert_eq!(
            date("Date", " 2024-07-22 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 22).unwrap()
        );
        assert!(date("Date", "22/07/2024").is_err());
        assert!(date("Date", "2024-02-30").is_err());
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year(2021).unwrap(), 2021);
        assert!(year(0).is_err());
    }
}

//! Row validation
//!
//! Decides whether one raw row is acceptable: all twelve numeric fields
//! parse as base-10 numbers and the date has the exact `DD-MM-YYYY` shape
//! and is a real calendar date. Failures are collected, not
//! short-circuited, so the result names every violated field.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{DATE_COLUMN, NUMERIC_FIELDS};
use crate::models::RawRow;

/// Shape guard for the date literal. chrono alone would accept
/// single-digit day/month, which reopens day/month-order ambiguity.
fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("valid date pattern"))
}

/// Base-10 number check. Scientific notation is accepted
/// (e.g. `1.72588E+15`); empty text, `inf` and `NaN` are not.
fn is_numeric(value: &str) -> bool {
    value
        .parse::<f64>()
        .map(|parsed| parsed.is_finite())
        .unwrap_or(false)
}

/// Validate one raw row. `Ok(())` means zero violations; `Err` carries one
/// message per violated field, in a fixed field order. A missing key
/// counts the same as an empty value.
pub fn validate(row: &RawRow) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let date = row.get(DATE_COLUMN).map(String::as_str).unwrap_or("");
    if !date_shape().is_match(date) || NaiveDate::parse_from_str(date, "%d-%m-%Y").is_err() {
        errors.push("Invalid date format".to_string());
    }

    for field in NUMERIC_FIELDS {
        let value = row.get(field).map(String::as_str).unwrap_or("");
        if !is_numeric(value) {
            errors.push(format!("{field} should be a valid number"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

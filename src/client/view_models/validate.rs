//! # Field Validation
//!
//! Shared validation helpers used by every form. Each helper records at
//! most one message per field into [`FieldErrors`]; a form submits only
//! when the collected set is empty, and nothing touches the network
//! before that.

use std::sync::OnceLock;

use chrono::Datelike;
use regex::Regex;

use crate::client::error::FieldErrors;

/// Earliest model year the listing form accepts.
pub const MIN_YEAR: i32 = 1900;

/// Latest model year the listing form accepts; next year's models are
/// listed ahead of release.
pub fn max_year() -> i32 {
    chrono::Utc::now().year() + 1
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static email pattern"))
}

pub fn required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required"));
    }
}

pub fn required_choice<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Option<T>,
    label: &str,
) {
    if value.is_none() {
        errors.push(field, format!("{label} is required"));
    }
}

pub fn min_length(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    min: usize,
    label: &str,
) {
    if value.trim().len() < min {
        errors.push(field, format!("{label} must be at least {min} characters long"));
    }
}

pub fn positive(errors: &mut FieldErrors, field: &'static str, value: i64, label: &str) {
    if value <= 0 {
        errors.push(field, format!("{label} must be greater than 0"));
    }
}

pub fn year_in_range(errors: &mut FieldErrors, field: &'static str, year: Option<i32>) {
    let max = max_year();
    match year {
        None => errors.push(field, "Year is required"),
        Some(year) if !(MIN_YEAR..=max).contains(&year) => {
            errors.push(field, format!("Year must be between {MIN_YEAR} and {max}"));
        }
        Some(_) => {}
    }
}

pub fn email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "Email is required");
    } else if !email_pattern().is_match(value.trim()) {
        errors.push(field, "Please enter a valid email address");
    }
}

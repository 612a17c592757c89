//! Field rules and derived values for user-submitted measurement records.
//!
//! The validator functions here are referenced from the `#[validate(...)]`
//! attributes on the Record Store DTOs.

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::{ValidationError, ValidationErrors};

use crate::reference::SECS_PER_MIN;
use crate::types::Timestamp;

/// Storage format for `date_added`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reject strings that are empty or only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be blank")));
    }
    Ok(())
}

/// Require a real calendar date written as `YYYY-MM-DD`.
pub fn validate_date_added(value: &str) -> Result<(), ValidationError> {
    let shaped = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if shaped && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("date_format").with_message(Cow::from(format!(
        "{value} is not a valid date format (YYYY-MM-DD)"
    ))))
}

/// The `date_added` value the store assigns to a record created at `now`.
pub fn date_added_for(now: Timestamp) -> String {
    now.date_naive().format(DATE_FORMAT).to_string()
}

/// Emissions per second for a run of `runtime_min` minutes.
pub fn emissions_rate(emissions: f64, runtime_min: f64) -> f64 {
    emissions / (runtime_min * SECS_PER_MIN)
}

/// Flatten validator output into one deterministic, human-readable line.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

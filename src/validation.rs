// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile field validation.
//!
//! Results are values, not errors: a form shows `message` next to the field.

use crate::time_utils::parse_backend;
use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Users must be at least this old to register.
pub const MIN_AGE_YEARS: u32 = 13;
/// Dates of birth further back than this are rejected.
pub const MAX_AGE_YEARS: u32 = 150;

pub const TOO_YOUNG_MESSAGE: &str = "Given age is considered too young to be registered ";
pub const TOO_OLD_MESSAGE: &str = "Given age is considered too old to be registered ";

/// Profile fields with validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Gender,
    Email,
    Password,
    MiddleName,
    FirstName,
    LastName,
    DateOfBirth,
    Other,
}

impl UserField {
    /// Map a form field name (`"date_of_birth"`, `"email"`, ...) to a field.
    pub fn from_name(name: &str) -> Self {
        match name {
            "gender" => UserField::Gender,
            "email" => UserField::Email,
            "password" => UserField::Password,
            "middlename" => UserField::MiddleName,
            "firstname" => UserField::FirstName,
            "lastname" => UserField::LastName,
            "date_of_birth" => UserField::DateOfBirth,
            _ => UserField::Other,
        }
    }
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FieldValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            valid: false,
            message: None,
        }
    }

    pub fn failed_with(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }

    fn from_bool(valid: bool) -> Self {
        if valid {
            Self::ok()
        } else {
            Self::failed()
        }
    }
}

/// Validate a field value against today's date.
pub fn validate_user(value: &str, field: UserField) -> FieldValidation {
    validate_user_on(value, field, Utc::now().date_naive())
}

/// Validate a field value, with `today` anchoring the age limits.
pub fn validate_user_on(value: &str, field: UserField, today: NaiveDate) -> FieldValidation {
    match field {
        UserField::Gender => {
            FieldValidation::from_bool(matches!(value, "Male" | "Female" | "Non-Binary"))
        }
        UserField::Password => FieldValidation::from_bool(!value.is_empty()),
        // Name and email checks accept any value; the server enforces format.
        UserField::Email
        | UserField::MiddleName
        | UserField::FirstName
        | UserField::LastName
        | UserField::Other => FieldValidation::ok(),
        UserField::DateOfBirth => validate_date_of_birth(value, today),
    }
}

/// Check that a date of birth is between 13 and 150 years before `today`.
pub fn validate_date_of_birth(raw: &str, today: NaiveDate) -> FieldValidation {
    let Some(dob) = parse_birth_date(raw) else {
        return FieldValidation::failed();
    };

    let youngest = today.checked_sub_months(Months::new(MIN_AGE_YEARS * 12));
    if youngest.is_some_and(|limit| dob > limit) {
        return FieldValidation::failed_with(TOO_YOUNG_MESSAGE);
    }

    let oldest = today.checked_sub_months(Months::new(MAX_AGE_YEARS * 12));
    if oldest.is_some_and(|limit| dob < limit) {
        return FieldValidation::failed_with(TOO_OLD_MESSAGE);
    }

    FieldValidation::ok()
}

/// `YYYY-MM-DD` of a date-of-birth value, as written.
pub fn format_date_of_birth(raw: &str) -> Option<String> {
    parse_birth_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Calendar date of `YYYY-MM-DD` or of an API timestamp, without any zone shift.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10)?;
    let rest = &raw[10..];

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    match rest {
        "" | "Z" => Some(date),
        _ if rest.starts_with('T') && parse_backend(raw).is_some() => Some(date),
        _ => None,
    }
}

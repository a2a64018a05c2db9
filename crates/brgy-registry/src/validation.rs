//! Field-level checks run before a resident is persisted. Each check passes or
//! fails with the message a form shows next to the offending field.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// local@domain.tld where local allows letters, digits and `._%+-`
    /// - Valid: "user@example.com", "first.last+tag@mail.example.ph"
    /// - Invalid: "user@example", "user@@example.com", "@example.com"
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

pub const PHONE_LENGTH: usize = 11;
pub const PHONE_PREFIX: &str = "09";
pub const VOTER_ID_DIGITS: std::ops::RangeInclusive<usize> = 10..=20;
pub const MAX_YEARS: u32 = 120;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Outcome = Result<(), ValidationError>;

/// An empty number passes; whether one is required is up to the caller.
pub fn validate_phone(value: &str, field_label: &str) -> Outcome {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() != PHONE_LENGTH {
        return Err(ValidationError::new(
            field_label,
            format!("{field_label} must be exactly {PHONE_LENGTH} digits."),
        ));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            field_label,
            format!("{field_label} must contain digits only."),
        ));
    }
    if !value.starts_with(PHONE_PREFIX) {
        return Err(ValidationError::new(
            field_label,
            format!("{field_label} must start with '{PHONE_PREFIX}'."),
        ));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Outcome {
    if value.is_empty() || EMAIL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "Email Address",
            "Please enter a valid email address.\nExample: user@example.com",
        ))
    }
}

pub fn validate_voter_id(value: &str) -> Outcome {
    if value.is_empty() {
        return Ok(());
    }
    let digits = value
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .collect::<String>();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "Voter's ID",
            "Voter's ID should contain only numbers and hyphens.\nExample: 1234-5678-9012",
        ));
    }
    if !VOTER_ID_DIGITS.contains(&digits.len()) {
        return Err(ValidationError::new(
            "Voter's ID",
            format!(
                "Voter's ID should be between {}-{} digits.",
                VOTER_ID_DIGITS.start(),
                VOTER_ID_DIGITS.end()
            ),
        ));
    }
    Ok(())
}

/// `None` stands for a dropdown still showing its placeholder.
pub fn validate_required_dropdown<T>(
    value: Option<T>,
    field_label: &str,
) -> Result<T, ValidationError> {
    value.ok_or_else(|| {
        ValidationError::new(
            field_label,
            format!("Please select a {}.", field_label.to_lowercase()),
        )
    })
}

pub fn validate_required_text(value: &str, field_label: &str) -> Outcome {
    if value.trim().is_empty() {
        Err(ValidationError::new(
            field_label,
            format!("{field_label} is required."),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_years(value: u32, field_label: &str) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|years| u32::from(*years) <= MAX_YEARS)
        .ok_or_else(|| {
            ValidationError::new(
                field_label,
                format!("{field_label} must be between 0 and {MAX_YEARS}."),
            )
        })
}

use std::borrow::Cow;

use lettre::Address;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::{
    entities::contact::{
        Submission, MAX_EMAIL_LENGTH, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH, MIN_MESSAGE_LENGTH,
        MIN_NAME_LENGTH,
    },
    errors::AppError,
};

/// One `@`, no whitespace, and at least one dot in the domain part.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Runs every field rule and collects all violations.
pub fn validate_submission(submission: &Submission) -> Result<(), AppError> {
    submission.validate().map_err(AppError::from)
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(new_validation_error("name_required", "Name is required"));
    }
    if !in_range(name, MIN_NAME_LENGTH, MAX_NAME_LENGTH) {
        return Err(new_validation_error(
            "name_length",
            "Name must be between 2 and 100 characters",
        ));
    }
    Ok(())
}

pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(new_validation_error("email_required", "Email is required"));
    }
    if email.chars().count() as u64 > MAX_EMAIL_LENGTH {
        return Err(new_validation_error(
            "email_length",
            "Email must not exceed 254 characters",
        ));
    }
    // The address must also be one the relay will accept as a mailbox.
    if !EMAIL_PATTERN.is_match(email)
        || !email.validate_email()
        || email.parse::<Address>().is_err()
    {
        return Err(new_validation_error(
            "email_invalid",
            "Please provide a valid email address",
        ));
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.is_empty() {
        return Err(new_validation_error("message_required", "Message is required"));
    }
    if !in_range(message, MIN_MESSAGE_LENGTH, MAX_MESSAGE_LENGTH) {
        return Err(new_validation_error(
            "message_length",
            "Message must be between 10 and 5000 characters",
        ));
    }
    Ok(())
}

fn in_range(value: &str, min: u64, max: u64) -> bool {
    let len = value.chars().count() as u64;
    (min..=max).contains(&len)
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

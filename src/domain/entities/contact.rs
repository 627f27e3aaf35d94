use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::{validate_email_address, validate_message, validate_name};

// ───── Limits ─────────────────────────────────────────────────────────
pub const MIN_NAME_LENGTH: u64 = 2;
pub const MAX_NAME_LENGTH: u64 = 100;
pub const MAX_EMAIL_LENGTH: u64 = 254;
pub const MAX_SUBJECT_LENGTH: u64 = 200;
pub const MIN_MESSAGE_LENGTH: u64 = 10;
pub const MAX_MESSAGE_LENGTH: u64 = 5000;

// ───── Input ──────────────────────────────────────────────────────────

/// Raw contact form body as posted by the browser.
/// Missing fields deserialize as empty so they surface as field errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// A trimmed contact form attempt, ready for validation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Submission {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[validate(length(max = MAX_SUBJECT_LENGTH, message = "Subject must not exceed 200 characters"))]
    pub subject: Option<String>,

    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl From<ContactForm> for Submission {
    fn from(form: ContactForm) -> Self {
        let subject = form
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Submission {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            subject,
            message: form.message.trim().to_string(),
        }
    }
}

// ───── Output ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub message_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub email_configured: bool,
}

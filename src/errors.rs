use std::fmt;

use actix_web::{
    error::{JsonPayloadError, ResponseError},
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    SpamDetected,
    RateLimitExceeded { retry_after: Option<u64> },
    ServiceUnavailable,
    EmailAuthError,
    EmailConnectionError,
    NotFound,
    InternalError(String),
}

impl AppError {
    /// Machine-readable code returned in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::SpamDetected => "SPAM_DETECTED",
            AppError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            AppError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            AppError::EmailAuthError => "EMAIL_AUTH_ERROR",
            AppError::EmailConnectionError => "EMAIL_CONNECTION_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the client. Internal details never leave the server.
    pub fn client_message(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "Validation failed",
            AppError::SpamDetected => "Message flagged as potential spam. Please revise your message.",
            AppError::RateLimitExceeded { .. } => "Too many requests. Please try again later.",
            AppError::ServiceUnavailable => "Email service is not configured. Please try again later.",
            AppError::EmailAuthError => "Email service authentication failed. Please try again later.",
            AppError::EmailConnectionError => "Could not connect to the email service. Please try again later.",
            AppError::NotFound => "Endpoint not found",
            AppError::InternalError(_) => "Failed to send message. Please try again later.",
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::RateLimitExceeded { retry_after: Some(secs) } => {
                write!(f, "rate limit exceeded, retry after {}s", secs)
            }
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
            _ => write!(f, "{}", self.client_message()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let details = match self {
            AppError::ValidationError(errors) => Some(errors.as_slice()),
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            error: self.client_message(),
            code: self.code(),
            details,
        };

        let mut response = HttpResponse::build(self.status_code());
        response.insert_header(ContentType::json());
        if let AppError::RateLimitExceeded { retry_after: Some(secs) } = self {
            response.insert_header((header::RETRY_AFTER, secs.to_string()));
        }
        response.json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::SpamDetected => StatusCode::BAD_REQUEST,
            AppError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EmailAuthError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EmailConnectionError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: "body".to_string(),
            message: format!("Invalid JSON payload: {}", err),
        }])
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Authentication(_) => AppError::EmailAuthError,
            DispatchError::Connection(_) => AppError::EmailConnectionError,
            other => AppError::InternalError(other.to_string()),
        }
    }
}

/// Failures reported by a mail dispatcher.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum DispatchError {
    #[display("SMTP authentication failed: {_0}")]
    Authentication(String),

    #[display("SMTP connection failed: {_0}")]
    Connection(String),

    #[display("Message could not be built: {_0}")]
    InvalidMessage(String),

    #[display("SMTP delivery failed: {_0}")]
    Delivery(String),
}

impl std::error::Error for DispatchError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

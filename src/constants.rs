use std::time::Duration;

pub const DEFAULT_SPAM_KEYWORDS: &[&str] = &[
    "casino",
    "lottery",
    "winner",
    "click here",
    "free money",
    "viagra",
    "crypto",
];

pub const NOTIFICATION_SUBJECT_PREFIX: &str = "Portfolio Contact: ";
pub const ACKNOWLEDGEMENT_SUBJECT: &str = "Thank you for contacting me!";
pub const RESPONSE_WINDOW: &str = "24-48 hours";

pub const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

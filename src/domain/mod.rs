pub mod entities;
pub mod mail_composer;
pub mod sanitizer;
pub mod spam_filter;
pub mod use_cases;
pub mod validation;

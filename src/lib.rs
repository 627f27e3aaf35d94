use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases, mail_composer, sanitizer, spam_filter, validation};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{limiter, mail, utils};

use entities::mail::Sender;
use limiter::rate_limiter::FixedWindowLimiter;
use mail::smtp::SmtpDispatcher;
use mail_composer::MailComposer;
use repositories::mail_dispatcher::MailDispatcher;
use spam_filter::SpamFilter;
use use_cases::contact::ContactHandler;

pub struct AppState {
    pub contact_handler: ContactHandler,
    pub api_limiter: FixedWindowLimiter,
    pub trust_x_forwarded_for: bool,
}

impl AppState {
    /// Builds the state with the SMTP dispatcher described by `config`.
    /// Missing or broken SMTP settings leave the dispatcher unconfigured.
    pub fn new(config: &settings::AppConfig) -> Self {
        let dispatcher = match config.smtp_settings() {
            Some(smtp) => SmtpDispatcher::new(&smtp)
                .map(|d| Arc::new(d) as Arc<dyn MailDispatcher>)
                .map_err(|e| tracing::error!("SMTP transport error: {}", e))
                .ok(),
            None => {
                tracing::warn!("SMTP settings incomplete, contact form will answer 503");
                None
            }
        };

        Self::with_dispatcher(config, dispatcher)
    }

    pub fn with_dispatcher(
        config: &settings::AppConfig,
        dispatcher: Option<Arc<dyn MailDispatcher>>,
    ) -> Self {
        let window = config.rate_limit_window();

        let sender = Sender {
            name: config.mail_from_name.clone(),
            address: config.sender_address().unwrap_or_default(),
        };
        let composer = MailComposer::new(sender, config.operator_address().unwrap_or_default());

        let contact_handler = ContactHandler::new(
            dispatcher,
            FixedWindowLimiter::new(config.contact_rate_limit, window),
            SpamFilter::new(&config.spam_keywords),
            composer,
        );

        AppState {
            contact_handler,
            api_limiter: FixedWindowLimiter::new(config.api_rate_limit, window),
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }

    pub fn limiters(&self) -> Vec<FixedWindowLimiter> {
        vec![self.contact_handler.limiter.clone(), self.api_limiter.clone()]
    }
}

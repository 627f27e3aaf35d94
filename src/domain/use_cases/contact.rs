use std::sync::Arc;

use chrono::Utc;

use crate::{
    domain::{mail_composer::MailComposer, spam_filter::SpamFilter, validation::validate_submission},
    entities::{
        contact::{ContactForm, ContactResponse, Submission},
        mail::OutboundMessage,
    },
    errors::AppError,
    limiter::rate_limiter::FixedWindowLimiter,
    repositories::mail_dispatcher::MailDispatcher,
};

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

/// Contact submission pipeline:
/// rate limit, validate, dispatcher check, spam filter, compose, send, acknowledge.
pub struct ContactHandler {
    pub dispatcher: Option<Arc<dyn MailDispatcher>>,
    pub limiter: FixedWindowLimiter,
    pub spam_filter: SpamFilter,
    pub composer: MailComposer,
}

impl ContactHandler {
    pub fn new(
        dispatcher: Option<Arc<dyn MailDispatcher>>,
        limiter: FixedWindowLimiter,
        spam_filter: SpamFilter,
        composer: MailComposer,
    ) -> Self {
        ContactHandler {
            dispatcher,
            limiter,
            spam_filter,
            composer,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Runs one submission to completion. The acknowledgement is spawned and
    /// never awaited; its outcome is only logged.
    pub async fn submit(
        &self,
        form: ContactForm,
        client_ip: &str,
    ) -> Result<ContactResponse, AppError> {
        let decision = self.limiter.check(client_ip);
        if !decision.allowed {
            tracing::warn!(client_ip, "Contact rate limit exceeded");
            return Err(AppError::RateLimitExceeded {
                retry_after: decision.retry_after,
            });
        }

        let submission = Submission::from(form);
        validate_submission(&submission)?;

        let dispatcher = self.dispatcher.as_ref().ok_or_else(|| {
            tracing::error!("Contact submission received but no mail dispatcher is configured");
            AppError::ServiceUnavailable
        })?;

        if let Some(keyword) = self.spam_filter.matched_keyword(&submission.message) {
            tracing::warn!(client_ip, keyword, email = %submission.email, "Spam detected in contact submission");
            return Err(AppError::SpamDetected);
        }

        let mail = self.composer.compose(&submission, client_ip, Utc::now());

        let receipt = dispatcher.send(mail.notification).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to send contact notification");
            AppError::from(e)
        })?;

        tracing::info!(message_id = %receipt.message_id, "Contact notification sent");

        spawn_acknowledgement(Arc::clone(dispatcher), mail.acknowledgement);

        Ok(ContactResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            message_id: receipt.message_id,
        })
    }
}

fn spawn_acknowledgement(dispatcher: Arc<dyn MailDispatcher>, message: OutboundMessage) {
    tokio::spawn(async move {
        let recipient = message.recipient.clone();
        match dispatcher.send(message).await {
            Ok(receipt) => tracing::info!(
                message_id = %receipt.message_id,
                recipient = %recipient,
                "Acknowledgement sent"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                recipient = %recipient,
                "Failed to send acknowledgement"
            ),
        }
    });
}

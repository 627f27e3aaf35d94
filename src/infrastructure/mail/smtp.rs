use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use crate::{
    entities::mail::{DispatchReceipt, OutboundMessage},
    errors::DispatchError,
    repositories::mail_dispatcher::MailDispatcher,
    settings::SmtpSettings,
};

/// SMTP reply codes that mean the relay refused our credentials.
const AUTH_FAILURE_CODES: &[&str] = &["454", "530", "534", "535"];

/// Authenticated relay client. The underlying transport pools connections and
/// can be shared between in-flight requests.
#[derive(Clone)]
pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
    host: String,
}

impl SmtpDispatcher {
    pub fn new(settings: &SmtpSettings) -> anyhow::Result<Self> {
        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };

        let credentials = Credentials::new(
            settings.username.clone(),
            settings.password.as_str().to_owned(),
        );

        let transport = builder
            .port(settings.port)
            .credentials(credentials)
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            transport,
            timeout: settings.timeout,
            host: settings.host.clone(),
        })
    }

    fn build_message(
        &self,
        message: OutboundMessage,
        message_id: &str,
    ) -> Result<Message, DispatchError> {
        let from = Mailbox::new(
            Some(message.sender.name.clone()),
            parse_address(&message.sender.address)?,
        );
        let to = Mailbox::new(None, parse_address(&message.recipient)?);

        let mut builder = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject)
            .message_id(Some(message_id.to_string()));

        if let Some(reply_to) = message.reply_to.as_deref() {
            builder = builder.reply_to(Mailbox::new(None, parse_address(reply_to)?));
        }

        builder
            .multipart(MultiPart::alternative_plain_html(
                message.text_body,
                message.html_body,
            ))
            .map_err(|e| DispatchError::InvalidMessage(e.to_string()))
    }
}

#[async_trait]
impl MailDispatcher for SmtpDispatcher {
    async fn send(&self, message: OutboundMessage) -> Result<DispatchReceipt, DispatchError> {
        let message_id = new_message_id(&message.sender.address);
        let email = self.build_message(message, &message_id)?;

        match tokio::time::timeout(self.timeout, self.transport.send(email)).await {
            Err(_) => Err(DispatchError::Connection(format!(
                "no response from {} within {}s",
                self.host,
                self.timeout.as_secs()
            ))),
            Ok(Err(e)) => Err(classify_smtp_error(&e)),
            Ok(Ok(response)) if response.is_positive() => Ok(DispatchReceipt { message_id }),
            Ok(Ok(response)) => Err(DispatchError::Delivery(format!(
                "relay answered {}",
                response.code()
            ))),
        }
    }

    async fn verify(&self) -> Result<(), DispatchError> {
        match tokio::time::timeout(self.timeout, self.transport.test_connection()).await {
            Err(_) => Err(DispatchError::Connection(format!(
                "no response from {} within {}s",
                self.host,
                self.timeout.as_secs()
            ))),
            Ok(Err(e)) => Err(classify_smtp_error(&e)),
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(DispatchError::Connection(format!(
                "{} did not accept the test connection",
                self.host
            ))),
        }
    }
}

fn parse_address(raw: &str) -> Result<Address, DispatchError> {
    raw.parse::<Address>()
        .map_err(|e| DispatchError::InvalidMessage(format!("{raw}: {e}")))
}

/// `<uuid@domain>` using the sender's domain, or `localhost` when it has none.
pub fn new_message_id(sender_address: &str) -> String {
    let domain = sender_address
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|d| !d.is_empty())
        .unwrap_or("localhost");
    format!("<{}@{}>", Uuid::new_v4(), domain)
}

fn classify_smtp_error(err: &SmtpError) -> DispatchError {
    let code = err.status().map(|c| c.to_string());
    classify(code.as_deref(), err.is_timeout(), err.is_client() || err.is_response(), err.to_string())
}

/// Maps an SMTP failure onto a dispatch error kind.
/// A failure without any reply code that is not a local client error happened
/// on the wire and counts as a connection problem.
pub fn classify(
    code: Option<&str>,
    timed_out: bool,
    local_error: bool,
    detail: String,
) -> DispatchError {
    match code {
        Some(code) if AUTH_FAILURE_CODES.contains(&code) => DispatchError::Authentication(detail),
        Some(_) => DispatchError::Delivery(detail),
        None if timed_out || !local_error => DispatchError::Connection(detail),
        None => DispatchError::Delivery(detail),
    }
}

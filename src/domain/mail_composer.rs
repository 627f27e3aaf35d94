use chrono::{DateTime, Utc};

use crate::{
    constants::{ACKNOWLEDGEMENT_SUBJECT, NOTIFICATION_SUBJECT_PREFIX, RESPONSE_WINDOW},
    domain::sanitizer::{sanitize_input, sanitize_multiline},
    entities::{
        contact::Submission,
        mail::{ComposedMail, OutboundMessage, Sender},
    },
};

/// Builds the operator notification and the sender acknowledgement.
/// Pure: the receive time and client address are passed in.
#[derive(Debug, Clone)]
pub struct MailComposer {
    pub sender: Sender,
    pub operator_address: String,
}

impl MailComposer {
    pub fn new(sender: Sender, operator_address: impl Into<String>) -> Self {
        MailComposer {
            sender,
            operator_address: operator_address.into(),
        }
    }

    pub fn compose(
        &self,
        submission: &Submission,
        client_ip: &str,
        received_at: DateTime<Utc>,
    ) -> ComposedMail {
        ComposedMail {
            notification: self.notification(submission, client_ip, received_at),
            acknowledgement: self.acknowledgement(submission),
        }
    }

    pub fn notification(
        &self,
        submission: &Submission,
        client_ip: &str,
        received_at: DateTime<Utc>,
    ) -> OutboundMessage {
        let subject = match &submission.subject {
            Some(subject) => format!("{NOTIFICATION_SUBJECT_PREFIX}{subject}"),
            None => format!("{NOTIFICATION_SUBJECT_PREFIX}New message from {}", submission.name),
        };
        let received = received_at.to_rfc2822();
        let subject_line = submission.subject.as_deref().unwrap_or("(no subject)");

        let text_body = format!(
            "New contact form submission\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Subject: {subject_line}\n\n\
             Message:\n{message}\n\n\
             ---\n\
             Received: {received}\n\
             IP address: {client_ip}\n",
            name = submission.name,
            email = submission.email,
            message = submission.message,
        );

        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>New contact message</title></head>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f7; margin: 0; padding: 24px;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
    <div style="background: #4f46e5; color: #ffffff; padding: 20px 24px;">
      <h2 style="margin: 0;">New contact form submission</h2>
    </div>
    <div style="padding: 24px; color: #333333;">
      <p><strong>Name:</strong> {name}</p>
      <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
      <p><strong>Subject:</strong> {subject}</p>
      <div style="margin-top: 16px; padding: 16px; background: #f9fafb; border-left: 4px solid #4f46e5;">
        {message}
      </div>
    </div>
    <div style="padding: 12px 24px; font-size: 12px; color: #888888; border-top: 1px solid #eeeeee;">
      Received {received} from {client_ip}
    </div>
  </div>
</body>
</html>"#,
            name = sanitize_input(&submission.name),
            email = sanitize_input(&submission.email),
            subject = sanitize_input(subject_line),
            message = sanitize_multiline(&submission.message),
            received = sanitize_input(&received),
            client_ip = sanitize_input(client_ip),
        );

        OutboundMessage {
            sender: self.sender.clone(),
            recipient: self.operator_address.clone(),
            reply_to: Some(submission.email.clone()),
            subject,
            text_body,
            html_body,
        }
    }

    pub fn acknowledgement(&self, submission: &Submission) -> OutboundMessage {
        let text_body = format!(
            "Hi {name},\n\n\
             Thank you for reaching out! I have received your message and will get back to you within {RESPONSE_WINDOW}.\n\n\
             Best regards\n\n\
             ---\n\
             This is an automated reply. Please do not reply to this email.\n",
            name = submission.name,
        );

        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Thank you</title></head>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f7; margin: 0; padding: 24px;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
    <div style="background: #4f46e5; color: #ffffff; padding: 20px 24px;">
      <h2 style="margin: 0;">Thank you for getting in touch!</h2>
    </div>
    <div style="padding: 24px; color: #333333;">
      <p>Hi {name},</p>
      <p>Thank you for reaching out! I have received your message and will get back to you within <strong>{RESPONSE_WINDOW}</strong>.</p>
      <p>Best regards</p>
    </div>
    <div style="padding: 12px 24px; font-size: 12px; color: #888888; border-top: 1px solid #eeeeee;">
      This is an automated reply. Please do not reply to this email.
    </div>
  </div>
</body>
</html>"#,
            name = sanitize_input(&submission.name),
        );

        OutboundMessage {
            sender: self.sender.clone(),
            recipient: submission.email.clone(),
            reply_to: None,
            subject: ACKNOWLEDGEMENT_SUBJECT.to_string(),
            text_body,
            html_body,
        }
    }
}

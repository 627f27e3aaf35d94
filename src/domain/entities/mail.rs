use std::fmt;

/// Display name and address placed in the `From` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    pub address: String,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub sender: Sender,
    pub recipient: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Both messages derived from one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMail {
    pub notification: OutboundMessage,
    pub acknowledgement: OutboundMessage,
}

/// Returned by a dispatcher once the relay accepted a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub message_id: String,
}

use async_trait::async_trait;

use crate::{
    entities::mail::{DispatchReceipt, OutboundMessage},
    errors::DispatchError,
};

/// Transport that hands outbound messages to a mail relay.
/// Implementations must be safe to call from concurrent requests.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<DispatchReceipt, DispatchError>;

    async fn verify(&self) -> Result<(), DispatchError>;
}

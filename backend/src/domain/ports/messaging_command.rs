//! Driving port for appending chat messages.

use async_trait::async_trait;

use crate::domain::{Error, Message, UserId};

/// Domain use-case port for sending messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingCommand: Send + Sync {
    /// Append a message from `sender` to `receiver`.
    ///
    /// Empty `content` fails with `InvalidRequest` and stores nothing.
    async fn send(&self, sender: &UserId, receiver: &UserId, content: &str)
    -> Result<Message, Error>;
}

//! Driven port for the append-only message log.
use async_trait::async_trait;

use crate::domain::{Message, NewMessage, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by message repository adapters.
    pub enum MessagePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "message repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message and return the stored row.
    async fn insert(&self, message: &NewMessage) -> Result<Message, MessagePersistenceError>;

    /// Every message between `a` and `b` in either direction, oldest first.
    async fn list_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<Message>, MessagePersistenceError>;

    /// Distinct senders who have messaged `receiver`.
    async fn distinct_senders_to(
        &self,
        receiver: &UserId,
    ) -> Result<Vec<UserId>, MessagePersistenceError>;
}

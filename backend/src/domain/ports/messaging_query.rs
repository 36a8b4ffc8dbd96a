//! Driving port for reading threads and inboxes.

use async_trait::async_trait;

use crate::domain::{Error, Message, User, UserId};

/// Domain use-case port for message reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingQuery: Send + Sync {
    /// Messages between `a` and `b`, oldest first. Symmetric in its arguments.
    async fn thread(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, Error>;

    /// Distinct accounts that have messaged `doctor`.
    async fn inbox(&self, doctor: &UserId) -> Result<Vec<User>, Error>;
}

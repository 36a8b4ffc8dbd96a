//! Driving port for resolving accounts by identifier.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for user lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Resolve `id`, returning `None` when no such account exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}

//! Session-scoped storage for the doctor-contact grant.

use crate::domain::Error;

/// Per-session flag recording that the access gate approved this session.
///
/// Implementations never revoke a grant; it lives as long as the session.
#[cfg_attr(test, mockall::automock)]
pub trait AccessGrantStore {
    /// Whether this session already holds a grant.
    fn access_granted(&self) -> Result<bool, Error>;

    /// Record a grant for the rest of the session.
    fn grant_access(&self) -> Result<(), Error>;
}

//! Driving port for browsing doctors once contact is unlocked.

use async_trait::async_trait;

use crate::domain::{DoctorSearch, Error, User};

/// Domain use-case port for doctor lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorDirectoryQuery: Send + Sync {
    /// Doctors whose username contains the search text, ignoring case.
    async fn find_doctors(&self, search: &DoctorSearch) -> Result<Vec<User>, Error>;
}

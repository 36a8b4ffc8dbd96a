//! Doctor lookup offered to patients whose contact gate is open.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DoctorDirectoryQuery, UserPersistenceError, UserRepository};
use crate::domain::{Error, User};

/// Case-insensitive username filter. Blank input matches every doctor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorSearch(Option<String>);

impl DoctorSearch {
    /// Build a filter from optional free text.
    ///
    /// # Examples
    /// ```
    /// use carelink::domain::DoctorSearch;
    ///
    /// assert!(DoctorSearch::new(Some("  ")).is_unfiltered());
    /// assert!(DoctorSearch::new(Some("SMI")).matches("dr_smith"));
    /// ```
    pub fn new(raw: Option<&str>) -> Self {
        let needle = raw
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);
        Self(needle)
    }

    /// Filter matching every doctor.
    pub fn all() -> Self {
        Self(None)
    }

    /// Lowercased needle, if any.
    pub fn needle(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether no filtering applies.
    pub fn is_unfiltered(&self) -> bool {
        self.0.is_none()
    }

    /// Whether `username` contains the needle, ignoring case.
    pub fn matches(&self, username: &str) -> bool {
        self.needle()
            .is_none_or(|needle| username.to_lowercase().contains(needle))
    }
}

/// Directory service backed by the user repository.
#[derive(Clone)]
pub struct DoctorDirectoryService<U> {
    users: Arc<U>,
}

impl<U> DoctorDirectoryService<U> {
    /// Create the service over `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("Username already exists.")
        }
    }
}

#[async_trait]
impl<U> DoctorDirectoryQuery for DoctorDirectoryService<U>
where
    U: UserRepository,
{
    async fn find_doctors(&self, search: &DoctorSearch) -> Result<Vec<User>, Error> {
        self.users
            .list_doctors(search)
            .await
            .map_err(map_user_persistence_error)
    }
}

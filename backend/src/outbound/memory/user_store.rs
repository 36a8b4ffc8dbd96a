//! Mutex-guarded account store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DoctorSearch, User, UserAccount, UserId};

/// Account store kept in memory, in registration order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        let username = account.user().username();
        if accounts
            .iter()
            .any(|existing| existing.user().username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|account| account.user().id() == *id)
            .map(|account| account.user().clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|account| account.user().username().as_ref() == username)
            .cloned())
    }

    async fn list_doctors(&self, search: &DoctorSearch) -> Result<Vec<User>, UserPersistenceError> {
        let mut doctors: Vec<User> = self
            .lock()?
            .iter()
            .map(UserAccount::user)
            .filter(|user| user.is_doctor() && search.matches(user.username().as_ref()))
            .cloned()
            .collect();
        doctors.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(doctors)
    }
}

//! Account registration, login and lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::doctor_directory::map_user_persistence_error;
use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserRepository,
    UsersQuery,
};
use crate::domain::{
    Error, LoginCredentials, Registration, User, UserAccount, UserId,
};

/// Message returned for any failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Account service implementing the login, registration and lookup ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over a repository and credential hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("credential check failed: {error}"))
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username();
        let taken = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(map_user_persistence_error)?
            .is_some();
        if taken {
            return Err(Error::conflict("Username already exists.")
                .with_details(json!({ "field": "username", "code": "duplicate_username" })));
        }

        let hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            username.clone(),
            registration.age(),
            registration.role(),
        );
        self.users
            .insert(&UserAccount::new(user.clone(), hash))
            .await
            .map_err(map_user_persistence_error)?;

        info!(user_id = %user.id(), role = %user.role(), "registered account");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .map_err(map_hasher_error)?;
        if !verified {
            debug!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(account.into_user())
    }
}

#[async_trait]
impl<U, H> UsersQuery for AccountService<U, H>
where
    U: UserRepository,
    H: Send + Sync,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}

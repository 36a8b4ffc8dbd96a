//! Seeds the demo doctor accounts used in local environments.

use std::sync::Arc;

use tracing::info;

use crate::domain::doctor_directory::map_user_persistence_error;
use crate::domain::ports::{PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::{Age, Error, Role, User, UserAccount, UserId, Username};

/// Demo doctors as `(username, age)`.
pub const DEMO_DOCTORS: [(&str, u16); 2] = [("dr_smith", 52), ("dr_jane", 47)];

/// Outcome of one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Usernames created by this run.
    pub created: Vec<String>,
    /// Usernames that already existed.
    pub skipped: Vec<String>,
}

/// Creates any missing demo doctor accounts.
pub struct DemoDoctorSeeder<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> DemoDoctorSeeder<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a seeder.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    /// Ensure every demo doctor exists, all sharing `password`.
    pub async fn seed(&self, password: &str) -> Result<SeedReport, Error> {
        let mut report = SeedReport::default();
        for (name, years) in DEMO_DOCTORS {
            let existing = self
                .users
                .find_by_username(name)
                .await
                .map_err(map_user_persistence_error)?;
            if existing.is_some() {
                report.skipped.push(name.to_owned());
                continue;
            }

            let username = Username::new(name)
                .map_err(|err| Error::internal(format!("invalid demo username: {err}")))?;
            let age = Age::new(years)
                .map_err(|err| Error::internal(format!("invalid demo age: {err}")))?;
            let hash = self
                .hasher
                .hash(password)
                .map_err(|err| Error::internal(err.to_string()))?;
            let account =
                UserAccount::new(User::new(UserId::random(), username, age, Role::Doctor), hash);

            match self.users.insert(&account).await {
                Ok(()) => report.created.push(name.to_owned()),
                Err(UserPersistenceError::DuplicateUsername { .. }) => {
                    report.skipped.push(name.to_owned());
                }
                Err(err) => return Err(map_user_persistence_error(err)),
            }
        }

        info!(created = ?report.created, skipped = ?report.skipped, "demo doctors seeded");
        Ok(report)
    }
}

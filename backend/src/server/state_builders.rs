//! Builders wiring storage adapters into the domain services behind
//! [`HttpState`], plus demo account seeding over the same stores.

use std::sync::Arc;

use carelink::domain::ports::{
    GenerationClient, MessageRepository, PasswordHasher, UserRepository,
};
use carelink::domain::{
    AccountService, DemoDoctorSeeder, DoctorDirectoryService, Error, GenerationService,
    MessagingService, SeedReport,
};
use carelink::inbound::http::state::{HttpState, HttpStatePorts};
use carelink::outbound::credentials::Argon2PasswordHasher;
use carelink::outbound::persistence::{DieselMessageRepository, DieselUserRepository};
use mockable::DefaultClock;

use super::config::{ServerConfig, Storage};

fn http_state_over<U, M, H>(
    users: Arc<U>,
    messages: Arc<M>,
    hasher: Arc<H>,
    generation: Arc<dyn GenerationClient>,
) -> HttpState
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = Arc::new(AccountService::new(users.clone(), hasher));
    let messaging = Arc::new(MessagingService::new(
        messages,
        users.clone(),
        Arc::new(DefaultClock),
    ));
    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        users: accounts,
        messaging: messaging.clone(),
        messaging_query: messaging,
        doctors: Arc::new(DoctorDirectoryService::new(users)),
        generation: Arc::new(GenerationService::new(generation)),
    })
}

/// Build handler state for the configured storage backend.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(Argon2PasswordHasher::default());
    let generation = config.generation.clone();
    match &config.storage {
        Storage::Postgres(pool) => http_state_over(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselMessageRepository::new(pool.clone())),
            hasher,
            generation,
        ),
        Storage::Memory { users, messages } => {
            http_state_over(users.clone(), messages.clone(), hasher, generation)
        }
    }
}

/// Ensure the demo doctor accounts exist in the configured storage.
pub(crate) async fn seed_demo_doctors(
    config: &ServerConfig,
    password: &str,
) -> Result<SeedReport, Error> {
    let hasher = Arc::new(Argon2PasswordHasher::default());
    match &config.storage {
        Storage::Postgres(pool) => {
            DemoDoctorSeeder::new(Arc::new(DieselUserRepository::new(pool.clone())), hasher)
                .seed(password)
                .await
        }
        Storage::Memory { users, .. } => {
            DemoDoctorSeeder::new(users.clone(), hasher)
                .seed(password)
                .await
        }
    }
}

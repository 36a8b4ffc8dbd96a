//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod access_grant_store;
mod doctor_directory_query;
mod generation_client;
mod login_service;
mod message_repository;
mod messaging_command;
mod messaging_query;
mod password_hasher;
mod registration_service;
mod structured_generation;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use access_grant_store::MockAccessGrantStore;
pub use access_grant_store::AccessGrantStore;
#[cfg(test)]
pub use doctor_directory_query::MockDoctorDirectoryQuery;
pub use doctor_directory_query::DoctorDirectoryQuery;
#[cfg(test)]
pub use generation_client::MockGenerationClient;
pub use generation_client::{
    FixtureGenerationClient, GenerationClient, GenerationClientError,
    UnconfiguredGenerationClient,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use message_repository::MockMessageRepository;
pub use message_repository::{MessagePersistenceError, MessageRepository};
#[cfg(test)]
pub use messaging_command::MockMessagingCommand;
pub use messaging_command::MessagingCommand;
#[cfg(test)]
pub use messaging_query::MockMessagingQuery;
pub use messaging_query::MessagingQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use structured_generation::MockStructuredGeneration;
pub use structured_generation::{GenerationOutcome, StructuredGeneration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

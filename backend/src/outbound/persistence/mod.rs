//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between row structs and domain types.
//! Connections come from a `bb8` pool of `diesel-async` connections; schema
//! migrations are embedded in the binary.

mod diesel_error_mapping;
mod diesel_message_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_message_repository::DieselMessageRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! In-process adapters used when no database is configured and by tests.
//!
//! State lives behind a `std::sync::Mutex`; nothing survives a restart.

mod message_store;
mod user_store;

pub use message_store::InMemoryMessageRepository;
pub use user_store::InMemoryUserRepository;

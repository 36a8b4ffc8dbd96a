//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use carelink::domain::ports::{GenerationClient, UnconfiguredGenerationClient};
use carelink::outbound::memory::{InMemoryMessageRepository, InMemoryUserRepository};
use carelink::outbound::persistence::DbPool;

/// Where accounts and messages live.
#[derive(Clone)]
pub enum Storage {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local stores; contents vanish on restart.
    Memory {
        users: Arc<InMemoryUserRepository>,
        messages: Arc<InMemoryMessageRepository>,
    },
}

impl Storage {
    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::Memory {
            users: Arc::new(InMemoryUserRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) generation: Arc<dyn GenerationClient>,
}

impl ServerConfig {
    /// Configuration with in-memory storage and no generation credential.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            storage: Storage::in_memory(),
            generation: Arc::new(UnconfiguredGenerationClient),
        }
    }

    /// Persist accounts and messages in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.storage = Storage::Postgres(pool);
        self
    }

    /// Use `client` for the fitness and medication features.
    #[must_use]
    pub fn with_generation_client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.generation = client;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

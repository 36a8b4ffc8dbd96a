//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DoctorDirectoryQuery, LoginService, MessagingCommand, MessagingQuery, RegistrationService,
    StructuredGeneration, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub messaging: Arc<dyn MessagingCommand>,
    pub messaging_query: Arc<dyn MessagingQuery>,
    pub doctors: Arc<dyn DoctorDirectoryQuery>,
    pub generation: Arc<dyn StructuredGeneration>,
}

/// Parameter object for [`HttpState::new`].
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub messaging: Arc<dyn MessagingCommand>,
    pub messaging_query: Arc<dyn MessagingQuery>,
    pub doctors: Arc<dyn DoctorDirectoryQuery>,
    pub generation: Arc<dyn StructuredGeneration>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            users,
            messaging,
            messaging_query,
            doctors,
            generation,
        } = ports;
        Self {
            login,
            registration,
            users,
            messaging,
            messaging_query,
            doctors,
            generation,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockDoctorDirectoryQuery, MockLoginService, MockMessagingCommand, MockMessagingQuery,
    MockRegistrationService, MockStructuredGeneration, MockUsersQuery,
};
use crate::domain::{Age, Role, User, UserId, Username};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Session cookie name used by tests.
pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and a non-`Secure` cookie for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `res`, panicking when absent.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .unwrap_or_else(|| panic!("response did not set the session cookie"))
}

/// Build a user fixture.
pub fn user(id: &str, name: &str, years: u16, role: Role) -> User {
    User::new(
        UserId::new(id).expect("fixture id"),
        Username::new(name).expect("fixture username"),
        Age::new(years).expect("fixture age"),
        role,
    )
}

/// Mock ports for handler tests. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub users: MockUsersQuery,
    pub messaging: MockMessagingCommand,
    pub messaging_query: MockMessagingQuery,
    pub doctors: MockDoctorDirectoryQuery,
    pub generation: MockStructuredGeneration,
}

impl MockPorts {
    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            users: Arc::new(self.users),
            messaging: Arc::new(self.messaging),
            messaging_query: Arc::new(self.messaging_query),
            doctors: Arc::new(self.doctors),
            generation: Arc::new(self.generation),
        })
    }
}

//! Shared helpers for HTTP integration tests.
//!
//! The server module is compiled into each test crate so that tests drive the
//! exact app the binary serves, minus the listening socket.

#![expect(dead_code, reason = "each test crate uses a different subset of helpers")]

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::test as actix_test;
use actix_web::web;
use carelink::domain::ports::FixtureGenerationClient;
use carelink::inbound::http::health::HealthState;
use serde_json::{Value, json};

pub(crate) mod embedded_postgres;

#[path = "../../src/server/mod.rs"]
pub(crate) mod server;

pub(crate) use server::{AppDependencies, ServerConfig, build_app, seed_demo_doctors};

pub(crate) const DEMO_PASSWORD: &str = "demo-doctor-pass";
pub(crate) const PATIENT_PASSWORD: &str = "secret-pass";

/// In-memory server configuration with a throwaway key and canned
/// generation responses.
pub(crate) fn memory_config() -> ServerConfig {
    ServerConfig::new(
        Key::generate(),
        false,
        SameSite::Lax,
        "127.0.0.1:0".parse().expect("loopback addr"),
    )
    .with_generation_client(Arc::new(FixtureGenerationClient))
}

/// App dependencies for `config`.
pub(crate) fn deps(config: &ServerConfig) -> AppDependencies {
    AppDependencies::new(web::Data::new(HealthState::new()), config)
}

/// Session cookie set by `res`.
pub(crate) fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .unwrap_or_else(|| panic!("response did not set the session cookie"))
}

pub(crate) fn register_request(username: &str, age: u16, role: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": username,
            "password": PATIENT_PASSWORD,
            "age": age,
            "role": role
        }))
}

pub(crate) fn login_request(username: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password }))
}

/// The `id` field of a serialised user.
pub(crate) fn id_of(body: &Value) -> String {
    body["id"]
        .as_str()
        .unwrap_or_else(|| panic!("body has no id: {body}"))
        .to_owned()
}

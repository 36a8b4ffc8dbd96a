//! Carelink backend library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] owns entities, rules and
//! ports; [`inbound`] adapts HTTP requests onto domain services; [`outbound`]
//! implements the driven ports (PostgreSQL, in-memory storage, the generation
//! HTTP client and credential hashing).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

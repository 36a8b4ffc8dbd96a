//! Inbound adapters translating external requests into domain service calls.
//!
//! Only HTTP exists today; handlers live under [`http`].

pub mod http;

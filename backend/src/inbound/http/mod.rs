//! HTTP inbound adapter exposing the JSON API.

pub mod chat;
pub mod doctor_contact;
pub mod error;
pub mod generation;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

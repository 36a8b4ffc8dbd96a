//! Reqwest adapter for the external text-generation service.

mod dto;
mod http_client;

pub use http_client::{
    DEFAULT_GENERATION_ENDPOINT, DEFAULT_GENERATION_MODEL, GeminiClientBuildError, GeminiConfig,
    GeminiHttpClient,
};

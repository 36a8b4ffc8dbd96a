//! Application settings loaded via OrthoConfig.
//!
//! Values come from `CARELINK_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::outbound::generation::{DEFAULT_GENERATION_ENDPOINT, DEFAULT_GENERATION_MODEL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while resolving derived settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The API key file could not be read.
    #[error("failed to read generation API key at {path}: {source}")]
    ApiKeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Process-wide configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARELINK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. In-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Base URL of the generation API.
    pub generation_endpoint: Option<String>,
    /// Model name appended to the generation endpoint.
    pub generation_model: Option<String>,
    /// Generation API key. Prefer `generation_api_key_file` outside development.
    pub generation_api_key: Option<String>,
    /// File holding the generation API key.
    pub generation_api_key_file: Option<PathBuf>,
    /// Upstream request timeout in seconds.
    pub generation_timeout_secs: Option<u64>,
    /// Create the demo doctor accounts on startup.
    #[ortho_config(default = false)]
    pub seed_demo_doctors: bool,
    /// Password shared by the demo doctor accounts.
    pub demo_doctor_password: Option<String>,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Generation endpoint, falling back to the public API.
    pub fn generation_endpoint(&self) -> &str {
        self.generation_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GENERATION_ENDPOINT)
    }

    /// Generation model, falling back to the default model.
    pub fn generation_model(&self) -> &str {
        self.generation_model
            .as_deref()
            .unwrap_or(DEFAULT_GENERATION_MODEL)
    }

    /// Upstream request timeout; `None` keeps the transport default.
    pub fn generation_timeout(&self) -> Option<Duration> {
        self.generation_timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the API key. The inline value wins over the key file; blank
    /// values count as unset.
    pub fn generation_api_key(&self) -> Result<Option<Zeroizing<String>>, SettingsError> {
        if let Some(key) = non_blank(self.generation_api_key.as_deref()) {
            return Ok(Some(Zeroizing::new(key.to_owned())));
        }
        let Some(path) = self.generation_api_key_file.as_ref() else {
            return Ok(None);
        };
        let raw = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            SettingsError::ApiKeyFile {
                path: path.clone(),
                source,
            }
        })?);
        Ok(non_blank(Some(raw.as_str())).map(|key| Zeroizing::new(key.to_owned())))
    }

    /// Demo doctor password, when configured and non-blank.
    pub fn demo_doctor_password(&self) -> Option<&str> {
        non_blank(self.demo_doctor_password.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

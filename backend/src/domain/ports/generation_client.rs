//! Driven port for the external text-generation service.
//!
//! The domain owns the prompt and schema; adapters own transport and the
//! provider's envelope format.

use async_trait::async_trait;

use crate::domain::{GenerationKind, GenerationRequest};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the generation service.
    pub enum GenerationClientError {
        /// The request did not complete at the network level.
        Transport { message: String } =>
            "generation transport failed: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, body: String } =>
            "generation service returned status {status}: {body}",
        /// The response lacked a candidate text.
        MissingCandidate { message: String } =>
            "generation response missing candidate text: {message}",
    }
}

/// Port for one generation round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send `request` and return the first candidate's text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationClientError>;
}

/// Canned responses shaped like a well-behaved model.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGenerationClient;

impl FixtureGenerationClient {
    /// Raw text returned for `kind`.
    pub fn canned_text(kind: GenerationKind) -> &'static str {
        match kind {
            GenerationKind::Fitness => concat!(
                "Here is your plan:\n```json\n",
                r#"{"exercises": ["Brisk walking", "Bodyweight squats"], "#,
                r#""daily_time": "30 minutes", "#,
                r#""time_allocation": {"Brisk walking": "20 minutes", "Bodyweight squats": "10 minutes"}, "#,
                r#""calories_burned": "200-250", "#,
                r#""diet": "Balanced meals with plenty of vegetables."}"#,
                "\n```\n"
            ),
            GenerationKind::Medication => concat!(
                r#"{"low_power_meds": [{"name": "Paracetamol", "image": "https://placehold.co/96", "#,
                r#""info": "Mild pain and fever relief."}], "high_power_meds": []}"#
            ),
        }
    }
}

#[async_trait]
impl GenerationClient for FixtureGenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationClientError> {
        let kind = if request.response_schema().is_some() {
            GenerationKind::Medication
        } else {
            GenerationKind::Fitness
        };
        Ok(Self::canned_text(kind).to_owned())
    }
}

/// Client used when no credential is configured; every call fails fast.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerationClient;

#[async_trait]
impl GenerationClient for UnconfiguredGenerationClient {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationClientError> {
        Err(GenerationClientError::transport(
            "generation API key is not configured",
        ))
    }
}

//! Driving port for the fitness and medication features.

use async_trait::async_trait;

use crate::domain::{GenerationKind, StructuredResult};

/// Result of one feature request: always a usable result, plus an optional
/// user-facing notice when the result is degraded.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// Structured or degraded result.
    pub result: StructuredResult,
    /// Notice explaining a degraded result.
    pub notice: Option<String>,
}

/// Domain use-case port for structured generation. Infallible by contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructuredGeneration: Send + Sync {
    /// Ask the generation service about `topic` and normalise its answer.
    async fn generate(&self, topic: &str, kind: GenerationKind) -> GenerationOutcome;
}

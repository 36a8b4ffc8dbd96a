//! Fitness and medication features: one upstream call, then normalisation.
//!
//! Failures never escape. Transport, status and envelope errors and
//! unparseable text all resolve to the degraded result plus a notice.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{GenerationClient, GenerationOutcome, StructuredGeneration};
use crate::domain::{GenerationKind, GenerationRequest, StructuredResult, normalize};

const PREVIEW_LIMIT: usize = 160;

/// Notice shown when the generation service could not be reached.
pub fn upstream_notice(kind: GenerationKind) -> String {
    format!("Could not connect to the {kind} service. Please try again later.")
}

/// Notice shown when the generated text could not be understood.
pub fn processing_notice(kind: GenerationKind) -> String {
    format!("An error occurred while processing the {kind} information. Please try again later.")
}

fn preview(text: &str) -> String {
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = compact.chars();
    let head: String = chars.by_ref().take(PREVIEW_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Structured generation over a [`GenerationClient`].
#[derive(Clone)]
pub struct GenerationService<G: ?Sized> {
    client: Arc<G>,
}

impl<G: ?Sized> GenerationService<G> {
    /// Create the service around `client`.
    pub fn new(client: Arc<G>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<G> StructuredGeneration for GenerationService<G>
where
    G: GenerationClient + ?Sized,
{
    async fn generate(&self, topic: &str, kind: GenerationKind) -> GenerationOutcome {
        if topic.trim().is_empty() {
            return GenerationOutcome {
                result: StructuredResult::empty(kind),
                notice: None,
            };
        }

        let request = GenerationRequest::for_topic(topic, kind);
        let text = match self.client.generate(&request).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%kind, %error, "generation request failed");
                return GenerationOutcome {
                    result: StructuredResult::degraded(kind),
                    notice: Some(upstream_notice(kind)),
                };
            }
        };

        match normalize(&text, kind) {
            Ok(result) => {
                info!(%kind, "generation succeeded");
                GenerationOutcome {
                    result,
                    notice: None,
                }
            }
            Err(error) => {
                warn!(%kind, %error, preview = %preview(&text), "failed to parse generated text");
                GenerationOutcome {
                    result: StructuredResult::degraded(kind),
                    notice: Some(processing_notice(kind)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureGenerationClient, GenerationClientError, MockGenerationClient,
    };
    use rstest::rstest;

    fn service(client: MockGenerationClient) -> GenerationService<MockGenerationClient> {
        GenerationService::new(Arc::new(client))
    }

    #[rstest]
    #[case(GenerationKind::Fitness)]
    #[case(GenerationKind::Medication)]
    #[tokio::test]
    async fn blank_topic_skips_upstream(#[case] kind: GenerationKind) {
        let mut client = MockGenerationClient::new();
        client.expect_generate().never();

        let outcome = service(client).generate("   ", kind).await;
        assert_eq!(outcome.result, StructuredResult::empty(kind));
        assert!(outcome.notice.is_none());
    }

    #[rstest]
    #[case(GenerationClientError::transport("connection reset"))]
    #[case(GenerationClientError::status(503_u16, "overloaded"))]
    #[case(GenerationClientError::missing_candidate("no candidates"))]
    #[tokio::test]
    async fn upstream_failures_degrade_with_connect_notice(#[case] error: GenerationClientError) {
        let mut client = MockGenerationClient::new();
        client.expect_generate().return_once(move |_| Err(error));

        let outcome = service(client)
            .generate("running", GenerationKind::Fitness)
            .await;
        assert_eq!(
            outcome.result,
            StructuredResult::degraded(GenerationKind::Fitness)
        );
        assert_eq!(
            outcome.notice.as_deref(),
            Some("Could not connect to the fitness service. Please try again later.")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unparseable_text_degrades_with_processing_notice() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .return_once(|_| Ok("not json at all".to_owned()));

        let outcome = service(client)
            .generate("headache", GenerationKind::Medication)
            .await;
        assert_eq!(
            outcome.result,
            StructuredResult::degraded(GenerationKind::Medication)
        );
        assert_eq!(
            outcome.notice.as_deref(),
            Some(
                "An error occurred while processing the medication information. Please try again later."
            )
        );
    }

    #[rstest]
    #[tokio::test]
    async fn request_carries_verbatim_topic_and_schema() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .withf(|request| {
                request.prompt().contains("'  sore throat '") && request.response_schema().is_some()
            })
            .times(1)
            .return_once(|_| {
                Ok(FixtureGenerationClient::canned_text(GenerationKind::Medication).to_owned())
            });

        let outcome = service(client)
            .generate("  sore throat ", GenerationKind::Medication)
            .await;
        assert!(outcome.notice.is_none());
        assert_ne!(
            outcome.result,
            StructuredResult::degraded(GenerationKind::Medication)
        );
    }

    #[rstest]
    fn preview_compacts_and_truncates() {
        let long = "word ".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_LIMIT + 3);
        assert_eq!(preview("a\n\n b"), "a b");
    }
}

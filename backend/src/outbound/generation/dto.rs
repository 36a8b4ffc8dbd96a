//! Wire DTOs for the `generateContent` endpoint.
//!
//! Requests borrow from the domain request; responses decode leniently so the
//! adapter can report exactly which part of the envelope was missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::GenerationRequest;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequestDto<'a> {
    contents: [ContentDto<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfigDto<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentDto<'a> {
    parts: [PartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
struct PartDto<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigDto<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequestDto<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            contents: [ContentDto {
                parts: [PartDto {
                    text: request.prompt(),
                }],
            }],
            generation_config: request.response_schema().map(|schema| GenerationConfigDto {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<ResponsePartDto>,
}

#[derive(Debug, Deserialize)]
struct ResponsePartDto {
    text: Option<String>,
}

impl GenerateContentResponseDto {
    /// Text of `candidates[0].content.parts[0]`.
    pub(super) fn into_first_text(self) -> Result<String, &'static str> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or("no candidates")?;
        let content = candidate.content.ok_or("candidate has no content")?;
        let part = content
            .parts
            .into_iter()
            .next()
            .ok_or("candidate content has no parts")?;
        part.text.ok_or("first part has no text")
    }
}

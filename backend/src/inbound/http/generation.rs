//! Fitness and medication handlers.
//!
//! ```text
//! POST /api/v1/fitness {"query":"lose weight"}
//! POST /api/v1/medication {"query":"sore throat"}
//! ```
//!
//! Upstream and parse failures never surface as errors: the response is `200`
//! with the degraded result and a notice.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::GenerationOutcome;
use crate::domain::{Error, GenerationKind, StructuredResult};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::current_user;

/// Free-text topic for either feature.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequestBody {
    #[serde(default)]
    pub query: Option<String>,
}

/// Structured (or degraded) result plus an optional notice.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub result: StructuredResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl From<GenerationOutcome> for GenerationResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            result: outcome.result,
            notice: outcome.notice,
        }
    }
}

async fn run(
    state: &HttpState,
    session: &SessionContext,
    body: GenerationRequestBody,
    kind: GenerationKind,
) -> ApiResult<web::Json<GenerationResponse>> {
    current_user(state, session).await?;
    let topic = body.query.unwrap_or_default();
    let outcome = state.generation.generate(&topic, kind).await;
    Ok(web::Json(outcome.into()))
}

/// Ask for a fitness plan.
#[utoipa::path(
    post,
    path = "/api/v1/fitness",
    request_body = GenerationRequestBody,
    responses(
        (status = 200, description = "Fitness plan", body = GenerationResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["generation"],
    operation_id = "fitness"
)]
#[post("/fitness")]
pub async fn fitness(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GenerationRequestBody>,
) -> ApiResult<web::Json<GenerationResponse>> {
    run(&state, &session, payload.into_inner(), GenerationKind::Fitness).await
}

/// Ask for medication information.
#[utoipa::path(
    post,
    path = "/api/v1/medication",
    request_body = GenerationRequestBody,
    responses(
        (status = 200, description = "Medication catalogue", body = GenerationResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["generation"],
    operation_id = "medication"
)]
#[post("/medication")]
pub async fn medication(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GenerationRequestBody>,
) -> ApiResult<web::Json<GenerationResponse>> {
    run(&state, &session, payload.into_inner(), GenerationKind::Medication).await
}

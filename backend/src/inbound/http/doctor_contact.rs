//! Doctor-contact handlers: the access gate and the doctor directory.
//!
//! ```text
//! GET /api/v1/doctor-contact?searchQuery=smith
//! POST /api/v1/doctor-contact {"age":45,"medicationDays":10,"searchQuery":"smith"}
//! ```
//!
//! Doctors never pass through the gate; they are redirected to their inbox.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::AccessGrantStore;
use crate::domain::{AccessReason, DoctorSearch, Error, User, evaluate_access};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::current_user;
use crate::inbound::http::validation::{FormValue, form_text};

/// Where doctors are sent instead of the gate.
pub const INBOX_PATH: &str = "/api/v1/inbox";
/// Notice for a submission that does not satisfy the rule.
pub const CRITERIA_NOT_MET_NOTICE: &str = "You do not meet the criteria to contact a doctor.";
/// Notice for non-numeric gate inputs.
pub const INVALID_INPUT_NOTICE: &str = "Invalid input. Please enter valid numbers.";

/// Gate submission for `POST /api/v1/doctor-contact`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorContactRequest {
    #[serde(default)]
    pub age: Option<FormValue>,
    #[serde(default)]
    pub medication_days: Option<FormValue>,
    #[serde(default)]
    pub search_query: Option<String>,
}

/// Directory filter for `GET /api/v1/doctor-contact`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DoctorContactParams {
    /// Case-insensitive username fragment.
    pub search_query: Option<String>,
}

/// Gate state plus, once unlocked, the matching doctors.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorContactResponse {
    pub access_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<AccessReason>,
    pub doctors: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl DoctorContactResponse {
    fn locked(reason: Option<AccessReason>, notice: Option<&str>) -> Self {
        Self {
            access_allowed: false,
            reason,
            doctors: Vec::new(),
            notice: notice.map(str::to_owned),
        }
    }
}

fn inbox_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, INBOX_PATH))
        .finish()
}

async fn unlocked(
    state: &HttpState,
    reason: Option<AccessReason>,
    search: Option<&str>,
) -> ApiResult<DoctorContactResponse> {
    let doctors = state.doctors.find_doctors(&DoctorSearch::new(search)).await?;
    Ok(DoctorContactResponse {
        access_allowed: true,
        reason,
        doctors,
        notice: None,
    })
}

/// Report the session's grant and, when unlocked, list doctors.
#[utoipa::path(
    get,
    path = "/api/v1/doctor-contact",
    params(DoctorContactParams),
    responses(
        (status = 200, description = "Gate state", body = DoctorContactResponse),
        (status = 303, description = "Doctors are redirected to their inbox"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["doctor-contact"],
    operation_id = "getDoctorContact"
)]
#[get("/doctor-contact")]
pub async fn doctor_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DoctorContactParams>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    if user.is_doctor() {
        return Ok(inbox_redirect());
    }

    let response = if session.access_granted()? {
        unlocked(
            &state,
            Some(AccessReason::PreviouslyGranted),
            params.search_query.as_deref(),
        )
        .await?
    } else {
        DoctorContactResponse::locked(None, None)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Evaluate the gate and, when it opens, search the doctor directory.
///
/// Denied and malformed submissions are not errors: they answer `200` with a
/// notice and leave the session untouched.
#[utoipa::path(
    post,
    path = "/api/v1/doctor-contact",
    request_body = DoctorContactRequest,
    responses(
        (status = 200, description = "Gate outcome", body = DoctorContactResponse),
        (status = 303, description = "Doctors are redirected to their inbox"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["doctor-contact"],
    operation_id = "submitDoctorContact"
)]
#[post("/doctor-contact")]
pub async fn submit_doctor_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DoctorContactRequest>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    if user.is_doctor() {
        return Ok(inbox_redirect());
    }

    let payload = payload.into_inner();
    let existing = session.access_granted()?;
    let age = form_text(payload.age.as_ref());
    let days = form_text(payload.medication_days.as_ref());

    let response = match evaluate_access(&age, &days, existing) {
        Ok(decision) if decision.granted() => {
            if decision.fresh_grant() {
                session.grant_access()?;
                info!(user_id = %user.id(), "doctor contact unlocked");
            }
            unlocked(&state, Some(decision.reason()), payload.search_query.as_deref()).await?
        }
        Ok(decision) => {
            DoctorContactResponse::locked(Some(decision.reason()), Some(CRITERIA_NOT_MET_NOTICE))
        }
        Err(error) => {
            info!(user_id = %user.id(), %error, "rejected doctor contact input");
            DoctorContactResponse::locked(None, Some(INVALID_INPUT_NOTICE))
        }
    };
    Ok(HttpResponse::Ok().json(response))
}

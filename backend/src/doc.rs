//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the request
//! and response schemas they exchange and the session cookie security scheme.
//! Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AccessReason, Error, ErrorCode, FitnessPlan, Medication, MedicationCatalog, Message, Role,
    StructuredResult, User,
};
use crate::inbound::http::chat::{ChatResponse, InboxResponse, SendMessageRequest};
use crate::inbound::http::doctor_contact::{DoctorContactRequest, DoctorContactResponse};
use crate::inbound::http::generation::{GenerationRequestBody, GenerationResponse};
use crate::inbound::http::users::{DashboardResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::validation::FormValue;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Carelink backend API",
        description = "Accounts, doctor contact, patient/doctor chat and structured health suggestions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::dashboard,
        crate::inbound::http::doctor_contact::doctor_contact,
        crate::inbound::http::doctor_contact::submit_doctor_contact,
        crate::inbound::http::chat::chat,
        crate::inbound::http::chat::send_message,
        crate::inbound::http::chat::inbox,
        crate::inbound::http::generation::fitness,
        crate::inbound::http::generation::medication,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        Message,
        AccessReason,
        FitnessPlan,
        Medication,
        MedicationCatalog,
        StructuredResult,
        FormValue,
        RegisterRequest,
        LoginRequest,
        DashboardResponse,
        DoctorContactRequest,
        DoctorContactResponse,
        SendMessageRequest,
        ChatResponse,
        InboxResponse,
        GenerationRequestBody,
        GenerationResponse,
    )),
    tags(
        (name = "users", description = "Registration, login and the dashboard"),
        (name = "doctor-contact", description = "Access gate and doctor directory"),
        (name = "chat", description = "Patient/doctor messaging"),
        (name = "generation", description = "Fitness plans and medication suggestions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! Domain primitives, services and ports.
//!
//! Purpose: define the account, message and generation model independently of
//! HTTP and storage. Services implement the driving ports in [`ports`] over the
//! driven ports adapters provide.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Role, Username: account identity.
//! - Message: chat log entries.
//! - evaluate_access: the doctor-contact gate.
//! - normalize / normalize_or_degrade: generated-text parsing.

pub mod access_gate;
pub mod account_service;
pub mod auth;
pub mod demo_doctors;
pub mod doctor_directory;
pub mod error;
pub mod generation;
pub mod generation_service;
pub mod message;
pub mod messaging_service;
pub mod normalizer;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::access_gate::{
    AccessDecision, AccessGateError, AccessReason, GateField, evaluate_access, meets_criteria,
};
pub use self::account_service::{AccountService, INVALID_CREDENTIALS};
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::demo_doctors::{DEMO_DOCTORS, DemoDoctorSeeder, SeedReport};
pub use self::doctor_directory::{DoctorDirectoryService, DoctorSearch};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::generation::{GenerationKind, GenerationRequest};
pub use self::generation_service::{GenerationService, processing_notice, upstream_notice};
pub use self::message::{
    Message, MessageContent, MessageValidationError, NewMessage, sort_thread,
};
pub use self::messaging_service::MessagingService;
pub use self::normalizer::{
    FITNESS_DEGRADED_TEXT, FitnessPlan, Medication, MedicationCatalog, NOT_AVAILABLE,
    NormalizeError, StructuredResult, normalize, normalize_or_degrade,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AGE_MAX, Age, PasswordHash, Role, USERNAME_MAX, User, UserAccount, UserId,
    UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use carelink::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

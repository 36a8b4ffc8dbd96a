//! Eligibility rule deciding whether a patient may contact doctors.
//!
//! The grant is sticky: once a session has been approved, later evaluations
//! report granted without inspecting the inputs. Persisting a fresh grant is
//! the caller's job, through an [`AccessGrantStore`](super::ports::AccessGrantStore).

use serde::Serialize;
use utoipa::ToSchema;

/// Age above which the shorter medication history suffices.
pub const SENIOR_AGE_THRESHOLD: i64 = 40;
/// Minimum medication days for patients older than the threshold.
pub const SENIOR_MIN_DAYS: i64 = 10;
/// Minimum medication days for everyone else.
pub const STANDARD_MIN_DAYS: i64 = 30;

/// Why an evaluation resolved the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// The session already held a grant; inputs were not inspected.
    PreviouslyGranted,
    /// The inputs satisfied the rule.
    CriteriaMet,
    /// The inputs did not satisfy the rule.
    CriteriaNotMet,
}

/// Outcome of [`evaluate_access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    granted: bool,
    reason: AccessReason,
}

impl AccessDecision {
    const fn new(granted: bool, reason: AccessReason) -> Self {
        Self { granted, reason }
    }

    /// Whether doctor contact is unlocked.
    pub const fn granted(self) -> bool {
        self.granted
    }

    /// Why the decision was reached.
    pub const fn reason(self) -> AccessReason {
        self.reason
    }

    /// Whether the caller must persist a new grant into the session.
    pub const fn fresh_grant(self) -> bool {
        matches!(self.reason, AccessReason::CriteriaMet)
    }
}

/// Input field names reported by [`AccessGateError::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateField {
    /// Patient age in years.
    Age,
    /// Days the patient has been on medication.
    MedicationDays,
}

impl GateField {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::MedicationDays => "medicationDays",
        }
    }
}

/// Failure evaluating the gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessGateError {
    /// An input was not an integer.
    #[error("{} must be a whole number, got {value:?}", field.as_str())]
    InvalidInput {
        /// Offending field.
        field: GateField,
        /// Raw caller-supplied text.
        value: String,
    },
}

fn parse_field(field: GateField, raw: &str) -> Result<i64, AccessGateError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AccessGateError::InvalidInput {
            field,
            value: raw.to_owned(),
        })
}

/// Whether `(age, days)` satisfies the contact rule.
pub const fn meets_criteria(age: i64, medication_days: i64) -> bool {
    if age > SENIOR_AGE_THRESHOLD {
        medication_days >= SENIOR_MIN_DAYS
    } else {
        medication_days >= STANDARD_MIN_DAYS
    }
}

/// Evaluate the contact gate for one submission.
///
/// An existing grant short-circuits before any parsing, so even unparseable
/// input reports granted. Otherwise both inputs must be integers.
///
/// # Examples
/// ```
/// use carelink::domain::{evaluate_access, AccessReason};
///
/// let decision = evaluate_access("45", "10", false).unwrap();
/// assert!(decision.granted());
/// assert!(decision.fresh_grant());
///
/// let sticky = evaluate_access("not a number", "", true).unwrap();
/// assert_eq!(sticky.reason(), AccessReason::PreviouslyGranted);
/// ```
pub fn evaluate_access(
    age: &str,
    medication_days: &str,
    existing_grant: bool,
) -> Result<AccessDecision, AccessGateError> {
    if existing_grant {
        return Ok(AccessDecision::new(true, AccessReason::PreviouslyGranted));
    }

    let age = parse_field(GateField::Age, age)?;
    let days = parse_field(GateField::MedicationDays, medication_days)?;

    Ok(if meets_criteria(age, days) {
        AccessDecision::new(true, AccessReason::CriteriaMet)
    } else {
        AccessDecision::new(false, AccessReason::CriteriaNotMet)
    })
}

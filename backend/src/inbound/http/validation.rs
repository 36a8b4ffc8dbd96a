//! Shared validation helpers for inbound HTTP adapters.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, LoginValidationError, RegistrationValidationError, UserId};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyUsername,
    EmptyPassword,
    InvalidUsername,
    InvalidAge,
    InvalidRole,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidAge => "invalid_age",
            Self::InvalidRole => "invalid_role",
        }
    }
}

fn field_error(field: &str, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => field_error(
            "username",
            ValidationCode::EmptyUsername,
            "username must not be empty",
        ),
        LoginValidationError::EmptyPassword => field_error(
            "password",
            ValidationCode::EmptyPassword,
            "password must not be empty",
        ),
    }
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    let code = match err {
        RegistrationValidationError::Username(_) => ValidationCode::InvalidUsername,
        RegistrationValidationError::EmptyPassword => ValidationCode::EmptyPassword,
        RegistrationValidationError::Age(_) => ValidationCode::InvalidAge,
        RegistrationValidationError::Role(_) => ValidationCode::InvalidRole,
    };
    field_error(err.field(), code, err.to_string())
}

/// Path segment naming another account. Anything that is not a UUID is
/// indistinguishable from an unknown account.
pub(crate) fn parse_other_user(raw: &str) -> Result<UserId, Error> {
    Uuid::parse_str(raw)
        .map(UserId::from_uuid)
        .map_err(|_| Error::not_found("User not found."))
}

/// Form-style scalar that clients may send as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum FormValue {
    #[schema(value_type = f64)]
    Number(serde_json::Number),
    Text(String),
}

impl FormValue {
    /// Raw text the domain parsers see.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(number) => Cow::Owned(number.to_string()),
            Self::Text(text) => Cow::Borrowed(text),
        }
    }
}

/// Text of an optional form value; absent reads as empty.
pub(crate) fn form_text(value: Option<&FormValue>) -> Cow<'_, str> {
    value.map_or(Cow::Borrowed(""), FormValue::as_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, UserValidationError};
    use rstest::rstest;

    #[rstest]
    #[case(r#"45"#, "45")]
    #[case(r#""  12 ""#, "  12 ")]
    #[case(r#"4.5"#, "4.5")]
    fn form_values_accept_numbers_and_text(#[case] raw: &str, #[case] text: &str) {
        let value: FormValue = serde_json::from_str(raw).expect("form value");
        assert_eq!(value.as_text(), text);
    }

    #[rstest]
    fn absent_form_value_reads_empty() {
        assert_eq!(form_text(None), "");
    }

    #[rstest]
    #[case(RegistrationValidationError::Username(UserValidationError::EmptyUsername), "username", "invalid_username")]
    #[case(RegistrationValidationError::EmptyPassword, "password", "empty_password")]
    #[case(RegistrationValidationError::Age(UserValidationError::InvalidAge), "age", "invalid_age")]
    #[case(RegistrationValidationError::Role(UserValidationError::UnknownRole), "role", "invalid_role")]
    fn registration_errors_carry_field_and_code(
        #[case] err: RegistrationValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = map_registration_validation_error(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_other_user_is_not_found(#[case] raw: &str) {
        let err = parse_other_user(raw).expect_err("malformed id");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "User not found.");
    }
}

//! Regression coverage for user value types.

use super::*;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("a_very_long_username_indeed", UserValidationError::UsernameTooLong { max: USERNAME_MAX })]
#[case("dr smith", UserValidationError::UsernameInvalidCharacters)]
#[case("drü", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  dr_smith ").expect("valid username");
    assert_eq!(username.as_ref(), "dr_smith");
}

#[rstest]
#[case("patient", Role::Patient)]
#[case("Doctor", Role::Doctor)]
#[case(" PATIENT ", Role::Patient)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>().expect("known role"), expected);
}

#[rstest]
fn role_rejects_unknown_values() {
    assert_eq!(
        "nurse".parse::<Role>().expect_err("unknown role"),
        UserValidationError::UnknownRole
    );
}

#[rstest]
#[case("42", Ok(42))]
#[case(" 7 ", Ok(7))]
#[case("forty", Err(UserValidationError::InvalidAge))]
#[case("-1", Err(UserValidationError::AgeOutOfRange { max: AGE_MAX }))]
#[case("151", Err(UserValidationError::AgeOutOfRange { max: AGE_MAX }))]
fn age_parses_form_text(#[case] raw: &str, #[case] expected: Result<u16, UserValidationError>) {
    assert_eq!(Age::parse(raw).map(Age::years), expected);
}

#[rstest]
fn user_serialises_camel_case_with_lowercase_role() {
    let user = User::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        Username::new("dr_jane").expect("fixture username"),
        Age::new(51).expect("fixture age"),
        Role::Doctor,
    );

    let value: Value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "username": "dr_jane",
            "age": 51,
            "role": "doctor",
        })
    );
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$argon2id$v=19$secret");
    assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
}

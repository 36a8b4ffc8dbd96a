//! Credential payloads for login and registration.
//!
//! Handlers hand raw strings to these constructors so the domain owns
//! validation before any port is called.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Age, Role, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use carelink::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("dr_smith", "hunter2").unwrap();
/// assert_eq!(creds.username(), "dr_smith");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plain-text password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Registration payload validation failures, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username failed validation.
    #[error("username: {0}")]
    Username(UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Age failed validation.
    #[error("age: {0}")]
    Age(UserValidationError),
    /// Role failed validation.
    #[error("role: {0}")]
    Role(UserValidationError),
}

impl RegistrationValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::EmptyPassword => "password",
            Self::Age(_) => "age",
            Self::Role(_) => "role",
        }
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
    age: Age,
    role: Role,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        age: &str,
        role: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username).map_err(RegistrationValidationError::Username)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        let age = Age::parse(age).map_err(RegistrationValidationError::Age)?;
        let role = role
            .parse::<Role>()
            .map_err(RegistrationValidationError::Role)?;

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
            age,
            role,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Declared age.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

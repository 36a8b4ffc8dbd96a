//! User identity model: identifiers, usernames, roles and stored accounts.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded the stored column width.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Username contained characters outside the allowed set.
    #[error("username may only contain letters, numbers, dots, dashes or underscores")]
    UsernameInvalidCharacters,
    /// Role was not `patient` or `doctor`.
    #[error("role must be either 'patient' or 'doctor'")]
    UnknownRole,
    /// Age was not a whole number.
    #[error("age must be a whole number")]
    InvalidAge,
    /// Age was outside the accepted range.
    #[error("age must be between 0 and {max}")]
    AgeOutOfRange {
        /// Largest accepted age.
        max: u16,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum username length, matching the `users.username` column.
pub const USERNAME_MAX: usize = 20;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login name.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`USERNAME_MAX`] characters.
/// - Only ASCII letters, digits, `_`, `.` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role. Behaviour dispatch (inbox vs. doctor contact) keys off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Patient accounts may unlock doctor contact through the access gate.
    Patient,
    /// Doctor accounts receive messages and browse their inbox.
    Doctor,
}

impl Role {
    /// Lowercase storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "doctor" => Ok(Self::Doctor),
            _ => Err(UserValidationError::UnknownRole),
        }
    }
}

/// Largest accepted age.
pub const AGE_MAX: u16 = 150;

/// Age in whole years recorded at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Age(u16);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(years: u16) -> Result<Self, UserValidationError> {
        if years > AGE_MAX {
            return Err(UserValidationError::AgeOutOfRange { max: AGE_MAX });
        }
        Ok(Self(years))
    }

    /// Parse an age from free-form text such as a form field.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let years = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| UserValidationError::InvalidAge)?;
        u16::try_from(years)
            .map_err(|_| UserValidationError::AgeOutOfRange { max: AGE_MAX })
            .and_then(Self::new)
    }

    /// Whole years.
    pub const fn years(self) -> u16 {
        self.0
    }
}

impl From<Age> for u16 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<u16> for Age {
    type Error = UserValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public identity of an account. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "dr_smith")]
    username: Username,
    #[schema(value_type = u16, example = 42)]
    age: Age,
    role: Role,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username, age: Age, role: Role) -> Self {
        Self {
            id,
            username,
            age,
            role,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Age recorded at registration.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Account role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether this account is a doctor.
    pub fn is_doctor(&self) -> bool {
        matches!(self.role, Role::Doctor)
    }
}

/// Opaque credential hash produced by a [`PasswordHasher`](super::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string (e.g. PHC format).
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Stored account: public identity plus credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Pair a user with its credential hash.
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Public identity.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored credential hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Drop the credential material and keep the identity.
    pub fn into_user(self) -> User {
        self.user
    }
}

#[cfg(test)]
mod tests;

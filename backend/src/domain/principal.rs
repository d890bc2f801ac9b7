//! Principal identity types and login credentials.
//!
//! A [`Principal`] is the external identity provider's representation of an
//! authenticated user. This core never stores credentials; it only carries
//! the validated login payload to the provider boundary and holds the
//! resolved identity afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Error returned when identifier text is not a valid principal id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("principal id must be a valid UUID")]
pub struct PrincipalIdError;

/// Stable identifier for a principal, issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalId(Uuid, String);

impl PrincipalId {
    /// Validate and construct a [`PrincipalId`] from identifier text.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, PrincipalIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh random identifier. Used by fixture providers.
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, PrincipalIdError> {
        if id.trim() != id {
            return Err(PrincipalIdError);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| PrincipalIdError)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PrincipalId> for String {
    fn from(value: PrincipalId) -> Self {
        let PrincipalId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for PrincipalId {
    type Error = PrincipalIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Resolved identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: PrincipalId,
    display_name: String,
}

impl Principal {
    /// Construct a principal from its provider-issued parts.
    #[must_use]
    pub fn new(id: PrincipalId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Provider-issued identifier.
    #[must_use]
    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// Human-readable name reported by the provider.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials forwarded to the identity provider.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for provider lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

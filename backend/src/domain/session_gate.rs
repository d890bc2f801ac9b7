//! Session gate guarding state-mutating operations.
//!
//! The gate is a pure function of the session subject plus the injected
//! identity provider, so handler tests can substitute a double. It fails
//! closed: an absent subject, an unknown principal, and a provider failure
//! all produce [`Access::Denied`]; a provider outage is never promoted to a
//! fatal gate error.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::IdentityProvider;
use crate::domain::{Error, Principal, PrincipalId};

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The subject resolved to a known principal.
    Granted(Principal),
    /// No subject, unknown principal, or provider failure.
    Denied,
}

impl Access {
    /// Unwrap the principal or produce the adapter-facing denial error.
    ///
    /// Read-only browsing stays ungated; callers of mutating endpoints use
    /// this to turn a denial into a 401 at the HTTP boundary.
    pub fn require(self) -> Result<Principal, Error> {
        match self {
            Self::Granted(principal) => Ok(principal),
            Self::Denied => Err(Error::unauthorized("login required")),
        }
    }
}

/// Boundary guard consulted before submission and engagement operations.
#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn IdentityProvider>,
}

impl SessionGate {
    /// Create a gate delegating identity validation to the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Decide whether the session subject may proceed.
    pub async fn authorize(&self, subject: Option<&PrincipalId>) -> Access {
        let Some(id) = subject else {
            return Access::Denied;
        };

        match self.provider.resolve(id).await {
            Ok(Some(principal)) => Access::Granted(principal),
            Ok(None) => {
                warn!(%id, "session subject unknown to identity provider");
                Access::Denied
            }
            Err(error) => {
                warn!(%id, %error, "identity provider failed; denying access");
                Access::Denied
            }
        }
    }
}

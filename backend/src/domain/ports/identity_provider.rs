//! Driven port for the external identity provider.
//!
//! Account creation, credential storage, and password verification all live
//! behind this boundary. This core only asks the provider two questions:
//! "who is this session subject?" and "do these credentials name a
//! principal?".

use async_trait::async_trait;

use crate::domain::{LoginCredentials, Principal, PrincipalId};

/// Errors raised by identity provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityProviderError {
    /// The provider could not be reached or the call timed out.
    #[error("identity provider unreachable: {message}")]
    Transport { message: String },

    /// The provider answered outside its contract.
    #[error("identity provider protocol error: {message}")]
    Protocol { message: String },
}

impl IdentityProviderError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a protocol error with the given message.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

/// Port abstraction over the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a session subject to a principal, `None` when unknown.
    async fn resolve(&self, id: &PrincipalId)
    -> Result<Option<Principal>, IdentityProviderError>;

    /// Verify credentials, returning the principal id on success and `None`
    /// when the credentials do not match any account.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<PrincipalId>, IdentityProviderError>;
}

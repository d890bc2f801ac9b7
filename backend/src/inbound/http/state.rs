//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the board service, the session gate, and the identity port,
//! never on concrete persistence or provider wiring.

use std::sync::Arc;

use crate::domain::ports::{ComplaintRepository, IdentityProvider};
use crate::domain::{ComplaintBoardService, SessionGate};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Use-case service over the complaint store.
    pub board: ComplaintBoardService,
    /// Boundary guard for mutating endpoints.
    pub gate: SessionGate,
    /// Identity provider, consumed directly by the login handler.
    pub identity: Arc<dyn IdentityProvider>,
}

impl HttpState {
    /// Wire handler state from the two outbound adapters.
    #[must_use]
    pub fn new(store: Arc<dyn ComplaintRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            board: ComplaintBoardService::new(store),
            gate: SessionGate::new(identity.clone()),
            identity,
        }
    }
}

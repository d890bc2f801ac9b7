//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::PrincipalId;
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::InMemoryIdentityProvider;
use crate::outbound::persistence::InMemoryComplaintRepository;

/// Email registered with the seeded identity provider.
pub const TEST_EMAIL: &str = "asha@campus.example";
/// Password registered with the seeded identity provider.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over in-memory adapters with one registered account.
///
/// Returns the state plus the registered account's principal id so tests can
/// establish sessions directly.
pub fn seeded_state() -> (HttpState, PrincipalId) {
    let identity = InMemoryIdentityProvider::new();
    let principal = identity
        .register(TEST_EMAIL, TEST_PASSWORD, "Asha")
        .expect("seed account");
    let state = HttpState::new(
        Arc::new(InMemoryComplaintRepository::new()),
        Arc::new(identity),
    );
    (state, principal)
}

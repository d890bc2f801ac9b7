//! Identity provider adapters.
//!
//! The external provider owns accounts and credentials; these adapters only
//! implement the [`crate::domain::ports::IdentityProvider`] contract against
//! it. The in-memory variant backs development and tests.

mod http_provider;
mod memory;

pub use http_provider::HttpIdentityProvider;
pub use memory::InMemoryIdentityProvider;

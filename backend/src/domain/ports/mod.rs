//! Ports connecting the domain to its adapters.
//!
//! In hexagonal terms these are *driven* ports: the domain owns the trait,
//! outbound adapters (Diesel, in-memory, HTTP identity client) implement it.
//! Handler tests substitute doubles at this seam instead of wiring
//! infrastructure.

mod complaint_repository;
mod identity_provider;

pub use complaint_repository::{ComplaintRepository, ComplaintStoreError};
pub use identity_provider::{IdentityProvider, IdentityProviderError};

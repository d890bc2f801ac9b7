//! Community complaint board backend.
//!
//! Authenticated users submit text complaints tagged by department and type,
//! visitors browse them ranked by popularity, and authenticated users can
//! like a complaint to raise its rank. The crate is organised hexagonally:
//! [`domain`] owns the entities, ports, and use-case services; [`inbound`]
//! adapts HTTP; [`outbound`] implements persistence and the identity
//! provider boundary.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by the debug docs endpoint and tooling.
pub use doc::ApiDoc;

//! Complaint store adapters.
//!
//! Two implementations of the [`crate::domain::ports::ComplaintRepository`]
//! port:
//!
//! - **Diesel/PostgreSQL** via `diesel-async` and a `bb8` pool. The row
//!   structs and schema definitions are internal; the repository only
//!   translates between rows and domain types and maps database errors to
//!   the store error taxonomy.
//! - **In-memory**, used when no database is configured and by tests.

mod diesel_complaint_repository;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use memory::InMemoryComplaintRepository;
pub use pool::{DbPool, PoolError};

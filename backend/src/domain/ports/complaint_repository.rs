//! Driven port for complaint persistence adapters and their errors.
//!
//! The store owns the persisted collection exclusively: callers receive
//! owned copies of records and mutate engagement only through
//! [`ComplaintRepository::increment_likes`].

use async_trait::async_trait;

use crate::domain::{Complaint, ComplaintId, ComplaintSubmission};

/// Persistence errors raised by complaint store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplaintStoreError {
    /// Store connection could not be established or timed out.
    #[error("complaint store connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("complaint store query failed: {message}")]
    Query { message: String },

    /// The referenced complaint does not exist.
    #[error("no complaint with id {id}")]
    NotFound { id: String },
}

impl ComplaintStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given identifier.
    pub fn not_found(id: &ComplaintId) -> Self {
        Self::NotFound {
            id: id.to_string(),
        }
    }
}

/// Port abstraction over the persisted complaint collection.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a validated submission, assigning a fresh id and zero likes.
    async fn insert(&self, submission: &ComplaintSubmission)
    -> Result<Complaint, ComplaintStoreError>;

    /// Fetch every stored complaint. Unordered at this layer; ranking is the
    /// board service's job.
    async fn find_all(&self) -> Result<Vec<Complaint>, ComplaintStoreError>;

    /// Fetch a single complaint by identifier, `None` when absent.
    async fn find_by_id(&self, id: &ComplaintId)
    -> Result<Option<Complaint>, ComplaintStoreError>;

    /// Atomically add exactly one like to the matching record.
    ///
    /// The increment must happen at the storage layer, never as caller-side
    /// read-modify-write, so concurrent likers cannot lose updates. Returns
    /// [`ComplaintStoreError::NotFound`] when `id` does not exist; a silent
    /// no-op is not acceptable.
    async fn increment_likes(&self, id: &ComplaintId) -> Result<(), ComplaintStoreError>;
}

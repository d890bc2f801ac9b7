//! Complaint board service: submission, ranking, filtering, engagement.
//!
//! The service composes the [`ComplaintRepository`] port with the read-side
//! views. Ranking and filtering run over an already-fetched sequence, which
//! is acceptable at this dataset size; pushing the predicate into the
//! storage query is a known follow-up once boards grow.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{ComplaintRepository, ComplaintStoreError};
use crate::domain::{Complaint, ComplaintId, ComplaintSubmission, Error};

/// Sentinel department value meaning "do not filter".
pub const ALL_DEPARTMENTS: &str = "all";

/// Narrow a fetched sequence to one department.
///
/// `dept == "all"` returns the input unchanged. Otherwise keeps exactly the
/// elements whose department matches `dept` (case-sensitive, no
/// normalisation), preserving order. An empty result is valid.
#[must_use]
pub fn filter_by_department(complaints: Vec<Complaint>, dept: &str) -> Vec<Complaint> {
    if dept == ALL_DEPARTMENTS {
        return complaints;
    }
    complaints
        .into_iter()
        .filter(|complaint| complaint.department() == dept)
        .collect()
}

fn rank(mut complaints: Vec<Complaint>) -> Vec<Complaint> {
    // Likes descending; ties broken by submission time then id text so the
    // output is identical across calls on unchanged data.
    complaints.sort_by(|a, b| {
        (Reverse(a.likes()), a.submitted_at(), a.id().as_ref())
            .cmp(&(Reverse(b.likes()), b.submitted_at(), b.id().as_ref()))
    });
    complaints
}

fn map_store_error(error: ComplaintStoreError) -> Error {
    match error {
        ComplaintStoreError::Connection { message } => Error::service_unavailable(message),
        ComplaintStoreError::Query { message } => Error::internal(message),
        ComplaintStoreError::NotFound { id } => Error::not_found(format!("no complaint with id {id}")),
    }
}

/// Use-case service over the complaint store.
#[derive(Clone)]
pub struct ComplaintBoardService {
    store: Arc<dyn ComplaintRepository>,
}

impl ComplaintBoardService {
    /// Create a service backed by the given store adapter.
    #[must_use]
    pub fn new(store: Arc<dyn ComplaintRepository>) -> Self {
        Self { store }
    }

    /// Persist a validated submission and return the stored record.
    pub async fn submit(&self, submission: &ComplaintSubmission) -> Result<Complaint, Error> {
        self.store.insert(submission).await.map_err(map_store_error)
    }

    /// Every complaint, ranked by likes descending with a deterministic
    /// tie-break (submission time, then id).
    pub async fn ranked(&self) -> Result<Vec<Complaint>, Error> {
        let complaints = self.store.find_all().await.map_err(map_store_error)?;
        Ok(rank(complaints))
    }

    /// Ranked complaints narrowed to one department (`"all"` for no filter).
    pub async fn filtered(&self, dept: &str) -> Result<Vec<Complaint>, Error> {
        let ranked = self.ranked().await?;
        Ok(filter_by_department(ranked, dept))
    }

    /// Fetch one complaint by id.
    pub async fn complaint(&self, id: &ComplaintId) -> Result<Complaint, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no complaint with id {id}")))
    }

    /// Record one unit of engagement on the matching complaint.
    ///
    /// A missing record is observable: the store's not-found is logged and
    /// surfaced to the caller rather than swallowed.
    pub async fn like(&self, id: &ComplaintId) -> Result<(), Error> {
        self.store.increment_likes(id).await.map_err(|error| {
            if matches!(error, ComplaintStoreError::NotFound { .. }) {
                warn!(%id, "like targeted a missing complaint");
            }
            map_store_error(error)
        })
    }
}

//! In-memory complaint store.
//!
//! Used when no database is configured (development) and by tests. Mirrors
//! the persistence contract exactly: the increment happens under the
//! collection's write lock, so concurrent likers against the same id are all
//! reflected, and a missing id reports not-found instead of no-opping.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{ComplaintRepository, ComplaintStoreError};
use crate::domain::{Complaint, ComplaintId, ComplaintSubmission};

/// Process-local complaint store.
#[derive(Default)]
pub struct InMemoryComplaintRepository {
    rows: RwLock<Vec<Complaint>>,
}

impl InMemoryComplaintRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Complaint>>, ComplaintStoreError> {
        self.rows
            .read()
            .map_err(|_| ComplaintStoreError::query("complaint store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Complaint>>, ComplaintStoreError> {
        self.rows
            .write()
            .map_err(|_| ComplaintStoreError::query("complaint store lock poisoned"))
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(
        &self,
        submission: &ComplaintSubmission,
    ) -> Result<Complaint, ComplaintStoreError> {
        let complaint = Complaint::from_submission(ComplaintId::random(), submission, Utc::now());
        self.write()?.push(complaint.clone());
        Ok(complaint)
    }

    async fn find_all(&self) -> Result<Vec<Complaint>, ComplaintStoreError> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintStoreError> {
        Ok(self.read()?.iter().find(|row| row.id() == id).cloned())
    }

    async fn increment_likes(&self, id: &ComplaintId) -> Result<(), ComplaintStoreError> {
        let mut rows = self.write()?;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| ComplaintStoreError::not_found(id))?;
        row.record_like();
        Ok(())
    }
}

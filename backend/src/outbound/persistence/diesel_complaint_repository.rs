//! Diesel-backed complaint repository.
//!
//! A thin adapter: translate between rows and domain types, map Diesel and
//! pool errors onto the store error taxonomy, and keep the engagement
//! increment inside SQL (`SET likes = likes + 1`) so concurrent likers never
//! lose updates to read-modify-write races.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ComplaintRepository, ComplaintStoreError};
use crate::domain::{Complaint, ComplaintId, ComplaintSubmission};

use super::models::ComplaintRow;
use super::pool::{DbPool, PoolError};
use super::schema::complaints::dsl::{complaints, id as id_column, likes as likes_column};

/// PostgreSQL complaint store adapter.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Create a repository backed by the given pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ComplaintStoreError {
    match error {
        PoolError::Setup(message) | PoolError::Checkout(message) => {
            ComplaintStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ComplaintStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(%error, %operation, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ComplaintStoreError::connection("database connection error")
        }
        _ => ComplaintStoreError::query("database error"),
    }
}

fn map_row_error(message: String) -> ComplaintStoreError {
    debug!(%message, "stored row failed domain hydration");
    ComplaintStoreError::query("stored record is corrupt")
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(
        &self,
        submission: &ComplaintSubmission,
    ) -> Result<Complaint, ComplaintStoreError> {
        let mut conn = self.pool.acquire().await.map_err(map_pool_error)?;

        let row = ComplaintRow::for_submission(submission);
        diesel::insert_into(complaints)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "insert complaint"))?;

        row.into_domain().map_err(map_row_error)
    }

    async fn find_all(&self) -> Result<Vec<Complaint>, ComplaintStoreError> {
        let mut conn = self.pool.acquire().await.map_err(map_pool_error)?;

        let rows: Vec<ComplaintRow> = complaints
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "load complaints"))?;

        rows.into_iter()
            .map(ComplaintRow::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_row_error)
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintStoreError> {
        let mut conn = self.pool.acquire().await.map_err(map_pool_error)?;

        let row: Option<ComplaintRow> = complaints
            .filter(id_column.eq(id.as_uuid()))
            .select(ComplaintRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find complaint"))?;

        row.map(ComplaintRow::into_domain)
            .transpose()
            .map_err(map_row_error)
    }

    async fn increment_likes(&self, id: &ComplaintId) -> Result<(), ComplaintStoreError> {
        let mut conn = self.pool.acquire().await.map_err(map_pool_error)?;

        // Atomic add-one at the SQL layer; zero affected rows means the
        // record does not exist and must be reported, not swallowed.
        let updated = diesel::update(complaints.filter(id_column.eq(id.as_uuid())))
            .set(likes_column.eq(likes_column + 1))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "increment likes"))?;

        if updated == 0 {
            return Err(ComplaintStoreError::not_found(id));
        }
        Ok(())
    }
}

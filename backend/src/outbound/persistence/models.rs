//! Diesel row structs for the complaint table.
//!
//! Internal implementation details of the persistence layer; never exposed
//! to the domain. Conversion to the domain entity happens here so the
//! repository body stays a thin query layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Complaint, ComplaintId, ComplaintSubmission};

use super::schema::complaints;

/// Queryable/insertable complaint row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct ComplaintRow {
    pub id: Uuid,
    pub name: String,
    pub register_no: String,
    pub department: String,
    pub type_of_complaint: String,
    pub complaint_text: String,
    pub likes: i32,
    pub submitted_at: DateTime<Utc>,
}

/// Cast the database counter (i32) to the domain counter (u32).
///
/// The migration carries a `likes >= 0` check constraint, so the sign bit is
/// never set in practice.
#[expect(clippy::cast_sign_loss, reason = "likes is non-negative by constraint")]
pub(super) fn cast_likes(likes: i32) -> u32 {
    likes.max(0) as u32
}

impl ComplaintRow {
    /// Build a fresh row for a validated submission.
    pub(super) fn for_submission(submission: &ComplaintSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: submission.name().to_owned(),
            register_no: submission.register_no().to_owned(),
            department: submission.department().to_owned(),
            type_of_complaint: submission.type_of_complaint().to_owned(),
            complaint_text: submission.complaint_text().to_owned(),
            likes: 0,
            submitted_at: Utc::now(),
        }
    }

    /// Hydrate the domain entity from this row.
    pub(super) fn into_domain(self) -> Result<Complaint, String> {
        let id = ComplaintId::parse(self.id.to_string())
            .map_err(|error| format!("stored id {} is invalid: {error}", self.id))?;
        Ok(Complaint::from_parts(
            id,
            self.name,
            self.register_no,
            self.department,
            self.type_of_complaint,
            self.complaint_text,
            cast_likes(self.likes),
            self.submitted_at,
        ))
    }
}

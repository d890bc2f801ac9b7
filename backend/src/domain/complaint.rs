//! Complaint entity and its identifier.
//!
//! A [`Complaint`] is the core persisted record: who submitted it, which
//! department it targets, the free-form body, and an engagement counter.
//! Records are immutable to callers; the store is the only component that
//! assigns identifiers or moves the `likes` counter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::submission::ComplaintSubmission;

/// Error returned when identifier text is not a valid complaint id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("complaint id must be a valid UUID")]
pub struct ComplaintIdError;

/// Opaque complaint identifier, assigned by the store at creation.
///
/// Stored as a UUID v4. Parsing rejects malformed text so downstream layers
/// never see an identifier outside the expected format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(Uuid, String);

impl ComplaintId {
    /// Validate and construct a [`ComplaintId`] from identifier text.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, ComplaintIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ComplaintIdError> {
        if id.trim() != id {
            return Err(ComplaintIdError);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| ComplaintIdError)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for ComplaintId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ComplaintId> for String {
    fn from(value: ComplaintId) -> Self {
        let ComplaintId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = ComplaintIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A single user-submitted complaint record.
///
/// ## Invariants
/// - `id` is unique across the store and never reused.
/// - `likes` never decreases; it only moves via [`Complaint::record_like`],
///   by exactly one per call.
/// - `department` and `type_of_complaint` are opaque strings; no enumerated
///   domain is enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: ComplaintId,
    name: String,
    register_no: String,
    department: String,
    type_of_complaint: String,
    complaint_text: String,
    likes: u32,
    submitted_at: DateTime<Utc>,
}

impl Complaint {
    /// Build a freshly stored record from a validated submission.
    ///
    /// Called by store adapters only; `likes` starts at zero.
    pub(crate) fn from_submission(
        id: ComplaintId,
        submission: &ComplaintSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: submission.name().to_owned(),
            register_no: submission.register_no().to_owned(),
            department: submission.department().to_owned(),
            type_of_complaint: submission.type_of_complaint().to_owned(),
            complaint_text: submission.complaint_text().to_owned(),
            likes: 0,
            submitted_at,
        }
    }

    /// Reconstruct a record from persisted fields.
    #[expect(clippy::too_many_arguments, reason = "row hydration mirrors the schema")]
    pub(crate) fn from_parts(
        id: ComplaintId,
        name: String,
        register_no: String,
        department: String,
        type_of_complaint: String,
        complaint_text: String,
        likes: u32,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            register_no,
            department,
            type_of_complaint,
            complaint_text,
            likes,
            submitted_at,
        }
    }

    /// Stable identifier assigned at creation.
    #[must_use]
    pub fn id(&self) -> &ComplaintId {
        &self.id
    }

    /// Submitter display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submitter registration code.
    #[must_use]
    pub fn register_no(&self) -> &str {
        &self.register_no
    }

    /// Department the complaint is filed against; the filter key.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Descriptive complaint category.
    #[must_use]
    pub fn type_of_complaint(&self) -> &str {
        &self.type_of_complaint
    }

    /// Free-form complaint body.
    #[must_use]
    pub fn complaint_text(&self) -> &str {
        &self.complaint_text
    }

    /// Engagement counter.
    #[must_use]
    pub fn likes(&self) -> u32 {
        self.likes
    }

    /// Creation timestamp; the deterministic ranking tie-break.
    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Apply a single unit of engagement. In-memory store use only; the
    /// Diesel adapter increments at the SQL layer instead.
    pub(crate) fn record_like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn submission() -> ComplaintSubmission {
        ComplaintSubmission::try_from_parts(
            "Asha",
            "20CS117",
            "CS",
            "Infrastructure",
            "The third-floor lab projector is broken.",
        )
        .expect("valid submission")
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn malformed_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(ComplaintId::parse(raw), Err(ComplaintIdError));
    }

    #[test]
    fn id_round_trips_through_text() {
        let id = ComplaintId::random();
        let reparsed = ComplaintId::parse(id.as_ref()).expect("round trip");
        assert_eq!(reparsed, id);
    }

    #[test]
    fn new_records_start_with_zero_likes() {
        let complaint = Complaint::from_submission(ComplaintId::random(), &submission(), Utc::now());
        assert_eq!(complaint.likes(), 0);
        assert_eq!(complaint.department(), "CS");
    }

    #[test]
    fn record_like_moves_counter_by_one() {
        let mut complaint =
            Complaint::from_submission(ComplaintId::random(), &submission(), Utc::now());
        complaint.record_like();
        complaint.record_like();
        assert_eq!(complaint.likes(), 2);
    }

    #[test]
    fn serialises_with_presentation_field_names() {
        let complaint = Complaint::from_submission(ComplaintId::random(), &submission(), Utc::now());
        let value = serde_json::to_value(&complaint).expect("serialise");
        assert_eq!(value["registerNo"], "20CS117");
        assert_eq!(value["typeOfComplaint"], "Infrastructure");
        assert_eq!(value["likes"], 0);
    }
}

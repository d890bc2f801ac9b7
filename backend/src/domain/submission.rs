//! Complaint intake: validated submission fields.
//!
//! Keep inbound payload parsing outside the domain by exposing a constructor
//! that trims and validates string inputs before a handler talks to the
//! store. Blank required fields are rejected here rather than persisted.

/// Domain error returned when submission field values are invalid.
///
/// Each variant names the canonical field that was missing or blank after
/// trimming, so adapters can point the caller at the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionValidationError {
    /// Submitter name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Registration code was missing or blank once trimmed.
    #[error("registerNo must not be empty")]
    EmptyRegisterNo,
    /// Department was missing or blank once trimmed.
    #[error("department must not be empty")]
    EmptyDepartment,
    /// Complaint category was missing or blank once trimmed.
    #[error("typeOfComplaint must not be empty")]
    EmptyTypeOfComplaint,
    /// Complaint body was missing or blank once trimmed.
    #[error("complaintText must not be empty")]
    EmptyComplaintText,
}

impl SubmissionValidationError {
    /// Canonical field name the error refers to.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyRegisterNo => "registerNo",
            Self::EmptyDepartment => "department",
            Self::EmptyTypeOfComplaint => "typeOfComplaint",
            Self::EmptyComplaintText => "complaintText",
        }
    }
}

/// Validated complaint submission produced by intake.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
///
/// # Examples
/// ```
/// use backend::domain::ComplaintSubmission;
///
/// let submission = ComplaintSubmission::try_from_parts(
///     "Asha", "20CS117", "CS", "Infrastructure", "Projector broken.",
/// )
/// .unwrap();
/// assert_eq!(submission.department(), "CS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintSubmission {
    name: String,
    register_no: String,
    department: String,
    type_of_complaint: String,
    complaint_text: String,
}

fn required(value: &str, error: SubmissionValidationError) -> Result<String, SubmissionValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

impl ComplaintSubmission {
    /// Construct a submission from raw field inputs.
    ///
    /// Fields are trimmed; the first blank field is reported.
    pub fn try_from_parts(
        name: &str,
        register_no: &str,
        department: &str,
        type_of_complaint: &str,
        complaint_text: &str,
    ) -> Result<Self, SubmissionValidationError> {
        Ok(Self {
            name: required(name, SubmissionValidationError::EmptyName)?,
            register_no: required(register_no, SubmissionValidationError::EmptyRegisterNo)?,
            department: required(department, SubmissionValidationError::EmptyDepartment)?,
            type_of_complaint: required(
                type_of_complaint,
                SubmissionValidationError::EmptyTypeOfComplaint,
            )?,
            complaint_text: required(complaint_text, SubmissionValidationError::EmptyComplaintText)?,
        })
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

    /// Department the complaint targets.
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
}

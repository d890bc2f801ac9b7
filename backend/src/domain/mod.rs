//! Domain primitives, entities, and use-case services.
//!
//! Purpose: define the strongly typed core of the complaint board (the
//! complaint entity and its intake validation, principal identity, the
//! session gate, and the board service) independent of any transport or
//! storage concern. Adapters depend on this module, never the reverse.

pub mod board;
pub mod complaint;
pub mod error;
pub mod ports;
pub mod principal;
pub mod session_gate;
pub mod submission;

pub use self::board::{ALL_DEPARTMENTS, ComplaintBoardService, filter_by_department};
pub use self::complaint::{Complaint, ComplaintId, ComplaintIdError};
pub use self::error::{Error, ErrorCode};
pub use self::principal::{
    LoginCredentials, LoginValidationError, Principal, PrincipalId, PrincipalIdError,
};
pub use self::session_gate::{Access, SessionGate};
pub use self::submission::{ComplaintSubmission, SubmissionValidationError};

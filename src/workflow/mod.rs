//! Job allotment workflow: who may act on a job, what each action changes,
//! and which statuses a job shows as a result.

pub mod account;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod job;
pub mod permission;
pub mod report;
pub mod status;

pub use account::{resolve_user, reset_credential, AccountSettings};
pub use error::{Resource, WorkflowError};
pub use permission::{authorize, Action};
pub use report::{submit_report, verify_report};
pub use status::{derive_statuses, derive_statuses_bulk, FinalStatus, ParticipantStatus, StatusBundle};

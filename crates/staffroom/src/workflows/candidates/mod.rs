//! Candidate pipeline: application intake and the status workflow.
//!
//! The module owns the one genuinely stateful rule set in the marketplace:
//! which status transitions an application may take, how a transition is
//! serialized against concurrent reviewers, and which notifications fan out
//! after a commit. Persistence and message transport stay behind the
//! [`CandidateStore`] and [`NotificationChannel`] traits so the workflow can
//! be exercised against in-memory doubles.

pub mod domain;
pub mod fill;
pub mod notify;
pub mod policy;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationStatusView, ApplicationSubmission,
    JobApplication, JobId, JobPosting, MemberId, MemberRole,
};
pub use fill::JobFillMarker;
pub use notify::{
    DeliveryResult, DispatchConfig, Notification, NotificationChannel, NotificationDispatcher,
};
pub use router::candidate_router;
pub use service::{CandidatePipelineService, PipelineError, TransitionOutcome};
pub use store::{CandidateStore, StatusWrite, StoreError};

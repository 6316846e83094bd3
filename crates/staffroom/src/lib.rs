//! Candidate pipeline workflows for an education job marketplace.
//!
//! The heart of the crate is [`workflows::candidates`]: the status state
//! machine applied to job applications, the compare-and-swap persistence
//! contract that keeps concurrent reviewers from losing updates, and the
//! best-effort notification fan-out that accompanies each transition.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::{ApplicationId, ApplicationStatus, JobApplication, JobId, JobPosting};

/// Fields applied in a single conditional write when a transition commits.
///
/// `expected` carries the status the caller read before validating; the
/// store must refuse the write when the stored status no longer matches, so
/// two racing reviewers cannot silently overwrite each other. The timestamp
/// options are set-only: `None` means "leave the stored value alone".
#[derive(Debug, Clone, PartialEq)]
pub struct StatusWrite {
    pub expected: ApplicationStatus,
    pub status: ApplicationStatus,
    pub updated_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub hired_at: Option<DateTime<Utc>>,
}

/// Storage abstraction over the remote record store.
///
/// All operations are awaited I/O against an external service; nothing in
/// this crate caches records between calls.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, StoreError>;

    async fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, StoreError>;

    /// Compare-and-swap status write. Fails with [`StoreError::Conflict`]
    /// when the stored status differs from `write.expected`.
    async fn update_status(
        &self,
        id: &ApplicationId,
        write: StatusWrite,
    ) -> Result<JobApplication, StoreError>;

    async fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<JobApplication>, StoreError>;

    async fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, StoreError>;

    /// Sets `is_filled` on the posting. Idempotent on the flag.
    async fn mark_job_filled(&self, id: &JobId) -> Result<JobPosting, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record changed since it was read")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

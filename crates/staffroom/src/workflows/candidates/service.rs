use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication, JobId,
};
use super::fill::JobFillMarker;
use super::notify::{DeliveryResult, DispatchConfig, NotificationChannel, NotificationDispatcher};
use super::policy;
use super::store::{CandidateStore, StatusWrite, StoreError};

/// Service composing the transition policy, record store, and dispatcher.
pub struct CandidatePipelineService<S, N> {
    store: Arc<S>,
    dispatcher: Arc<NotificationDispatcher<N>>,
    fill: JobFillMarker<S, N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<S, N> CandidatePipelineService<S, N>
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    pub fn new(store: Arc<S>, channel: Arc<N>, config: DispatchConfig) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(channel, config));
        let fill = JobFillMarker::new(store.clone(), dispatcher.clone());
        Self {
            store,
            dispatcher,
            fill,
        }
    }

    /// Submit a new application against an open posting.
    pub async fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<JobApplication, PipelineError> {
        let job = self
            .store
            .fetch_job(&submission.job_id)
            .await?
            .ok_or(PipelineError::JobNotFound)?;

        if !job.accepts_applications() {
            return Err(PipelineError::JobClosed);
        }

        let now = Utc::now();
        let application = JobApplication {
            id: next_application_id(),
            job_id: submission.job_id,
            applicant_id: submission.applicant_id,
            status: ApplicationStatus::Pending,
            submitted_at: now,
            updated_at: now,
            reviewed_at: None,
            hired_at: None,
            cover_letter: submission.cover_letter,
            resume_reference: submission.resume_reference,
        };

        let stored = self.store.insert_application(application).await?;
        info!(
            application_id = %stored.id.0,
            job_id = %stored.job_id.0,
            "application submitted"
        );
        Ok(stored)
    }

    /// Apply a validated status transition.
    ///
    /// The read-validate-write sequence is serialized through the store's
    /// compare-and-swap contract: the write names the status this method
    /// read, and a concurrent commit in between surfaces as
    /// [`StoreError::Conflict`]. The caller may retry the whole transition
    /// from a fresh read; nothing is retried automatically.
    ///
    /// Everything after the committed write is best-effort. Notification and
    /// fill-marker failures are logged and reported in the outcome, never as
    /// an error: the status mutation is the operation of record.
    pub async fn transition(
        &self,
        id: &ApplicationId,
        requested: ApplicationStatus,
    ) -> Result<TransitionOutcome, PipelineError> {
        let application = self
            .store
            .fetch_application(id)
            .await?
            .ok_or(PipelineError::NotFound)?;
        let current = application.status;

        if !policy::is_allowed(current, requested) {
            return Err(PipelineError::InvalidTransition {
                from: current,
                requested,
                allowed: policy::allowed_transitions(current),
            });
        }

        let now = Utc::now();
        let write = StatusWrite {
            expected: current,
            status: requested,
            updated_at: now,
            // First entry into reviewed/hired stamps the timestamp; it is
            // never overwritten on later visits.
            reviewed_at: (requested == ApplicationStatus::Reviewed
                && application.reviewed_at.is_none())
            .then_some(now),
            hired_at: (requested == ApplicationStatus::Hired && application.hired_at.is_none())
                .then_some(now),
        };

        let updated = self.store.update_status(id, write).await?;
        info!(
            application_id = %updated.id.0,
            from = current.label(),
            to = requested.label(),
            "application status changed"
        );

        let mut applicant_notice = DeliveryResult::Skipped("job record unavailable".to_string());
        let mut fill_notices = Vec::new();

        match self.store.fetch_job(&updated.job_id).await {
            Ok(Some(job)) => {
                applicant_notice = self
                    .dispatcher
                    .notify_applicant(&updated.applicant_id, &updated.id, &job, current, requested)
                    .await;

                if requested == ApplicationStatus::Hired {
                    match self
                        .fill
                        .mark_filled(&updated.job_id, &updated.applicant_id)
                        .await
                    {
                        Ok(notices) => fill_notices = notices,
                        Err(error) => warn!(
                            job_id = %updated.job_id.0,
                            %error,
                            "position-filled fan-out failed"
                        ),
                    }
                }
            }
            Ok(None) => warn!(
                job_id = %updated.job_id.0,
                "job record missing; notifications skipped"
            ),
            Err(error) => warn!(
                job_id = %updated.job_id.0,
                %error,
                "job lookup failed; notifications skipped"
            ),
        }

        Ok(TransitionOutcome {
            previous_status: current,
            application: updated,
            applicant_notice,
            fill_notices,
        })
    }

    /// Fetch one application for API responses.
    pub async fn get(&self, id: &ApplicationId) -> Result<JobApplication, PipelineError> {
        self.store
            .fetch_application(id)
            .await?
            .ok_or(PipelineError::NotFound)
    }

    /// List a posting's applications for the candidates dashboard.
    pub async fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<JobApplication>, PipelineError> {
        self.store
            .fetch_job(job_id)
            .await?
            .ok_or(PipelineError::JobNotFound)?;
        Ok(self.store.applications_for_job(job_id).await?)
    }
}

/// Authoritative result of a committed transition.
#[derive(Debug)]
pub struct TransitionOutcome {
    pub application: JobApplication,
    pub previous_status: ApplicationStatus,
    pub applicant_notice: DeliveryResult,
    pub fill_notices: Vec<DeliveryResult>,
}

/// Error raised by the candidate pipeline service.
///
/// Store failures are hard failures: the mutation did not happen. Delivery
/// degradation never appears here; it lives in [`TransitionOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("application not found")]
    NotFound,
    #[error("job not found")]
    JobNotFound,
    #[error("job is no longer accepting applications")]
    JobClosed,
    #[error("cannot move a {} application to {}", .from.label(), .requested.label())]
    InvalidTransition {
        from: ApplicationStatus,
        requested: ApplicationStatus,
        allowed: &'static [ApplicationStatus],
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

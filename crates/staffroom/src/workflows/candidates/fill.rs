use std::sync::Arc;

use super::domain::{ApplicationStatus, JobId, MemberId};
use super::notify::{DeliveryResult, NotificationChannel, NotificationDispatcher};
use super::store::{CandidateStore, StoreError};

/// Marks a posting filled after a hire and notifies the remaining candidates.
///
/// The flag write is idempotent, but the recipient list is recomputed on
/// every call, so callers should invoke this once per hire.
pub struct JobFillMarker<S, N> {
    store: Arc<S>,
    dispatcher: Arc<NotificationDispatcher<N>>,
}

impl<S, N> JobFillMarker<S, N>
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    pub fn new(store: Arc<S>, dispatcher: Arc<NotificationDispatcher<N>>) -> Self {
        Self { store, dispatcher }
    }

    /// Flag the job as filled, then fan out "position filled" notices to
    /// every other candidate whose application is still in play.
    pub async fn mark_filled(
        &self,
        job_id: &JobId,
        hired_applicant_id: &MemberId,
    ) -> Result<Vec<DeliveryResult>, StoreError> {
        let job = self.store.mark_job_filled(job_id).await?;

        let applications = self.store.applications_for_job(job_id).await?;
        let recipients: Vec<MemberId> = applications
            .iter()
            .filter(|application| application.applicant_id != *hired_applicant_id)
            .filter(|application| application.status != ApplicationStatus::Rejected)
            .map(|application| application.applicant_id.clone())
            .collect();

        Ok(self.dispatcher.notify_others(&recipients, &job).await)
    }
}

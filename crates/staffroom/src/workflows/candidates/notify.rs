use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{ApplicationId, ApplicationStatus, JobPosting, MemberId};

/// Outbound message handed to the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: MemberId,
    pub body: String,
    pub metadata: BTreeMap<String, String>,
}

/// Per-recipient delivery outcome.
///
/// A failed delivery is recorded, never raised: notifications are advisory
/// and must not contaminate the committed status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryResult {
    Delivered,
    Skipped(String),
    Failed(String),
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered)
    }
}

/// Transport abstraction: in-app inbox, e-mail, realtime channel.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send(&self, notification: Notification) -> DeliveryResult;
}

/// Knobs for message composition.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Display name of the marketplace, used in message footers.
    pub sender: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            sender: "Staffroom".to_string(),
        }
    }
}

/// Composes status-change messages and fans them out through the channel.
pub struct NotificationDispatcher<N> {
    channel: Arc<N>,
    config: DispatchConfig,
}

impl<N> NotificationDispatcher<N>
where
    N: NotificationChannel + 'static,
{
    pub fn new(channel: Arc<N>, config: DispatchConfig) -> Self {
        Self { channel, config }
    }

    /// Tell the applicant their application moved from one status to another.
    pub async fn notify_applicant(
        &self,
        applicant_id: &MemberId,
        application_id: &ApplicationId,
        job: &JobPosting,
        old_status: ApplicationStatus,
        new_status: ApplicationStatus,
    ) -> DeliveryResult {
        let body = format!(
            "Your application for \"{}\" at {} ({}) moved from {} to {}.",
            job.title,
            job.employer_name,
            job.employer_role.label(),
            old_status.label(),
            new_status.label(),
        );

        let mut metadata = BTreeMap::new();
        metadata.insert("template".to_string(), "status_changed".to_string());
        metadata.insert("application_id".to_string(), application_id.0.clone());
        metadata.insert("job_id".to_string(), job.id.0.clone());
        metadata.insert("old_status".to_string(), old_status.label().to_string());
        metadata.insert("new_status".to_string(), new_status.label().to_string());
        metadata.insert("sender".to_string(), self.config.sender.clone());

        let result = self
            .channel
            .send(Notification {
                recipient: applicant_id.clone(),
                body,
                metadata,
            })
            .await;

        if let DeliveryResult::Failed(reason) = &result {
            warn!(
                application_id = %application_id.0,
                recipient = %applicant_id.0,
                %reason,
                "applicant notification failed"
            );
        }

        result
    }

    /// Tell every remaining candidate on a filled job that the position is
    /// gone. Returns one result per recipient; a failure for one recipient
    /// never aborts delivery to the rest.
    pub async fn notify_others(
        &self,
        applicant_ids: &[MemberId],
        job: &JobPosting,
    ) -> Vec<DeliveryResult> {
        let body = format!(
            "The position \"{}\" at {} has been filled. Thank you for applying through {}.",
            job.title, job.employer_name, self.config.sender,
        );

        let mut results = Vec::with_capacity(applicant_ids.len());
        for applicant_id in applicant_ids {
            let mut metadata = BTreeMap::new();
            metadata.insert("template".to_string(), "position_filled".to_string());
            metadata.insert("job_id".to_string(), job.id.0.clone());
            metadata.insert("sender".to_string(), self.config.sender.clone());

            let result = self
                .channel
                .send(Notification {
                    recipient: applicant_id.clone(),
                    body: body.clone(),
                    metadata,
                })
                .await;

            if let DeliveryResult::Failed(reason) = &result {
                warn!(
                    job_id = %job.id.0,
                    recipient = %applicant_id.0,
                    %reason,
                    "position-filled notification failed"
                );
            }

            results.push(result);
        }

        results
    }
}

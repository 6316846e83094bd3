use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use staffroom::workflows::candidates::{
    ApplicationId, CandidateStore, DeliveryResult, JobApplication, JobId, JobPosting, MemberId,
    MemberRole, Notification, NotificationChannel, StatusWrite, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the hosted record store, used by `serve` and the
/// CLI demo until the real backend adapter lands.
#[derive(Default)]
pub(crate) struct InMemoryCandidateStore {
    applications: Mutex<HashMap<ApplicationId, JobApplication>>,
    jobs: Mutex<HashMap<JobId, JobPosting>>,
}

impl InMemoryCandidateStore {
    pub(crate) fn seed_job(&self, job: JobPosting) {
        self.jobs
            .lock()
            .expect("job mutex poisoned")
            .insert(job.id.clone(), job);
    }
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, StoreError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    async fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, StoreError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        write: StatusWrite,
    ) -> Result<JobApplication, StoreError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        if record.status != write.expected {
            return Err(StoreError::Conflict);
        }
        record.status = write.status;
        record.updated_at = write.updated_at;
        if let Some(reviewed_at) = write.reviewed_at {
            record.reviewed_at = Some(reviewed_at);
        }
        if let Some(hired_at) = write.hired_at {
            record.hired_at = Some(hired_at);
        }
        Ok(record.clone())
    }

    async fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        let mut applications: Vec<JobApplication> = guard
            .values()
            .filter(|application| application.job_id == *job_id)
            .cloned()
            .collect();
        applications.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(applications)
    }

    async fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, StoreError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn mark_job_filled(&self, id: &JobId) -> Result<JobPosting, StoreError> {
        let mut guard = self.jobs.lock().expect("job mutex poisoned");
        let job = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        job.is_filled = true;
        Ok(job.clone())
    }
}

/// Notification channel that writes to the structured log instead of a real
/// transport.
#[derive(Default)]
pub(crate) struct TracingChannel;

#[async_trait]
impl NotificationChannel for TracingChannel {
    async fn send(&self, notification: Notification) -> DeliveryResult {
        info!(
            recipient = %notification.recipient.0,
            template = notification
                .metadata
                .get("template")
                .map(String::as_str)
                .unwrap_or("unknown"),
            body = %notification.body,
            "notification dispatched"
        );
        DeliveryResult::Delivered
    }
}

/// Sample postings so `serve --seed-demo` and the CLI demo have something to
/// transition.
pub(crate) fn sample_jobs() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: JobId("job-100".to_string()),
            employer_id: MemberId("member-riverside".to_string()),
            employer_name: "Riverside Primary".to_string(),
            employer_role: MemberRole::School,
            title: "Year 4 Classroom Teacher".to_string(),
            is_filled: false,
            is_active: true,
        },
        JobPosting {
            id: JobId("job-200".to_string()),
            employer_id: MemberId("member-hopebridge".to_string()),
            employer_name: "Hopebridge Learning Trust".to_string(),
            employer_role: MemberRole::Ngo,
            title: "After-School Literacy Tutor".to_string(),
            is_filled: false,
            is_active: true,
        },
        JobPosting {
            id: JobId("job-300".to_string()),
            employer_id: MemberId("member-alvarez".to_string()),
            employer_name: "Alvarez Family".to_string(),
            employer_role: MemberRole::Family,
            title: "Weekend Maths Tutor".to_string(),
            is_filled: false,
            is_active: true,
        },
    ]
}

pub(crate) fn seed_sample_jobs(store: &InMemoryCandidateStore) {
    for job in sample_jobs() {
        store.seed_job(job);
    }
}

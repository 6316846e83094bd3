use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::candidates::domain::{
    ApplicationId, ApplicationStatus, JobApplication, JobId, JobPosting, MemberId, MemberRole,
};
use crate::workflows::candidates::notify::{
    DeliveryResult, DispatchConfig, Notification, NotificationChannel,
};
use crate::workflows::candidates::service::CandidatePipelineService;
use crate::workflows::candidates::store::{CandidateStore, StatusWrite, StoreError};

pub(super) fn job() -> JobPosting {
    JobPosting {
        id: JobId("job-100".to_string()),
        employer_id: MemberId("member-riverside".to_string()),
        employer_name: "Riverside Primary".to_string(),
        employer_role: MemberRole::School,
        title: "Year 4 Classroom Teacher".to_string(),
        is_filled: false,
        is_active: true,
    }
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn application(
    id: &str,
    applicant: &str,
    status: ApplicationStatus,
) -> JobApplication {
    JobApplication {
        id: ApplicationId(id.to_string()),
        job_id: job().id,
        applicant_id: MemberId(applicant.to_string()),
        status,
        submitted_at: submitted_at(),
        updated_at: submitted_at(),
        reviewed_at: None,
        hired_at: None,
        cover_letter: "I have five years of classroom experience.".to_string(),
        resume_reference: Some("resumes/app-1.pdf".to_string()),
    }
}

pub(super) fn build_service() -> (
    Arc<CandidatePipelineService<MemoryStore, RecordingChannel>>,
    Arc<MemoryStore>,
    Arc<RecordingChannel>,
) {
    let store = Arc::new(MemoryStore::default());
    store.seed_job(job());
    let channel = Arc::new(RecordingChannel::default());
    let service = Arc::new(CandidatePipelineService::new(
        store.clone(),
        channel.clone(),
        DispatchConfig::default(),
    ));
    (service, store, channel)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    applications: Mutex<HashMap<ApplicationId, JobApplication>>,
    jobs: Mutex<HashMap<JobId, JobPosting>>,
}

impl MemoryStore {
    pub(super) fn seed_job(&self, job: JobPosting) {
        self.jobs
            .lock()
            .expect("job mutex poisoned")
            .insert(job.id.clone(), job);
    }

    pub(super) fn seed_application(&self, application: JobApplication) {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .insert(application.id.clone(), application);
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
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

#[derive(Default)]
pub(super) struct RecordingChannel {
    sent: Mutex<Vec<Notification>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingChannel {
    pub(super) fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Mutex::new(Some(reason.to_string())),
        }
    }

    pub(super) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("channel mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn send(&self, notification: Notification) -> DeliveryResult {
        if let Some(reason) = self.fail_with.lock().expect("channel mutex poisoned").clone() {
            return DeliveryResult::Failed(reason);
        }
        self.sent
            .lock()
            .expect("channel mutex poisoned")
            .push(notification);
        DeliveryResult::Delivered
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

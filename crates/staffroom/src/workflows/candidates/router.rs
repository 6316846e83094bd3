use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission, JobId, MemberId};
use super::notify::NotificationChannel;
use super::service::{CandidatePipelineService, PipelineError};
use super::store::{CandidateStore, StoreError};

/// Router builder exposing HTTP endpoints for intake, status reads, and
/// transitions.
pub fn candidate_router<S, N>(service: Arc<CandidatePipelineService<S, N>>) -> Router
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates/jobs/:job_id/applications",
            post(submit_handler::<S, N>).get(list_handler::<S, N>),
        )
        .route(
            "/api/v1/candidates/applications/:application_id",
            get(status_handler::<S, N>),
        )
        .route(
            "/api/v1/candidates/applications/:application_id/status",
            post(transition_handler::<S, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntakeRequest {
    applicant_id: String,
    cover_letter: String,
    #[serde(default)]
    resume_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionRequest {
    status: ApplicationStatus,
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<CandidatePipelineService<S, N>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<IntakeRequest>,
) -> Response
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    let submission = ApplicationSubmission {
        job_id: JobId(job_id),
        applicant_id: MemberId(request.applicant_id),
        cover_letter: request.cover_letter,
        resume_reference: request.resume_reference,
    };

    match service.submit(submission).await {
        Ok(application) => {
            (StatusCode::ACCEPTED, axum::Json(application.status_view())).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<S, N>(
    State(service): State<Arc<CandidatePipelineService<S, N>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    let id = JobId(job_id);
    match service.applications_for_job(&id).await {
        Ok(applications) => {
            let views: Vec<_> = applications
                .iter()
                .map(|application| application.status_view())
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<S, N>(
    State(service): State<Arc<CandidatePipelineService<S, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id).await {
        Ok(application) => {
            (StatusCode::OK, axum::Json(application.status_view())).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn transition_handler<S, N>(
    State(service): State<Arc<CandidatePipelineService<S, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    S: CandidateStore + 'static,
    N: NotificationChannel + 'static,
{
    let id = ApplicationId(application_id);
    match service.transition(&id, request.status).await {
        Ok(outcome) => {
            let payload = json!({
                "application_id": outcome.application.id.0,
                "status": outcome.application.status.label(),
                "updated_at": outcome.application.updated_at,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: PipelineError) -> Response {
    let (status, payload) = match &error {
        PipelineError::NotFound
        | PipelineError::JobNotFound
        | PipelineError::Store(StoreError::NotFound) => {
            (StatusCode::NOT_FOUND, json!({ "error": error.to_string() }))
        }
        PipelineError::JobClosed => (StatusCode::CONFLICT, json!({ "error": error.to_string() })),
        PipelineError::InvalidTransition { allowed, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": error.to_string(),
                "allowed": allowed
                    .iter()
                    .map(|status| status.label())
                    .collect::<Vec<_>>(),
            }),
        ),
        PipelineError::Store(StoreError::Conflict) => (
            StatusCode::CONFLICT,
            json!({ "error": "status changed concurrently; reload and retry" }),
        ),
        PipelineError::Store(StoreError::Unavailable(_)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, axum::Json(payload)).into_response()
}

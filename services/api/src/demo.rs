use crate::infra::{seed_sample_jobs, InMemoryCandidateStore, TracingChannel};
use clap::Args;
use std::sync::Arc;

use staffroom::config::AppConfig;
use staffroom::error::AppError;
use staffroom::telemetry;
use staffroom::workflows::candidates::{
    ApplicationStatus, ApplicationSubmission, CandidatePipelineService, DeliveryResult,
    DispatchConfig, JobId, MemberId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Member id used for the walked-through candidate
    #[arg(long, default_value = "member-ana")]
    pub(crate) applicant: String,
    /// Posting the candidate applies to
    #[arg(long, default_value = "job-100")]
    pub(crate) job: String,
}

/// Walk one candidate from intake to hire, printing each authoritative step.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let store = Arc::new(InMemoryCandidateStore::default());
    seed_sample_jobs(&store);
    let channel = Arc::new(TracingChannel);
    let service = CandidatePipelineService::new(
        store,
        channel,
        DispatchConfig {
            sender: config.notify.sender.clone(),
        },
    );

    let job_id = JobId(args.job.clone());

    let candidate = service
        .submit(ApplicationSubmission {
            job_id: job_id.clone(),
            applicant_id: MemberId(args.applicant.clone()),
            cover_letter: "I have five years of classroom experience.".to_string(),
            resume_reference: Some(format!("resumes/{}.pdf", args.applicant)),
        })
        .await?;
    println!("submitted:\n{}", pretty(&candidate.status_view())?);

    let runner_up = service
        .submit(ApplicationSubmission {
            job_id: job_id.clone(),
            applicant_id: MemberId("member-ben".to_string()),
            cover_letter: "Newly qualified and eager to start.".to_string(),
            resume_reference: None,
        })
        .await?;
    println!("second applicant: {}", runner_up.id.0);

    for status in [
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Hired,
    ] {
        let outcome = service.transition(&candidate.id, status).await?;
        println!(
            "moved {} -> {} (applicant notice: {})",
            outcome.previous_status.label(),
            outcome.application.status.label(),
            describe(&outcome.applicant_notice),
        );
        if !outcome.fill_notices.is_empty() {
            println!(
                "position-filled notices sent: {}",
                outcome.fill_notices.len()
            );
        }
    }

    // The pipeline refuses to reopen a hire as pending; show the guardrail.
    if let Err(error) = service
        .transition(&candidate.id, ApplicationStatus::Pending)
        .await
    {
        println!("guardrail: {error}");
    }

    let dashboard = service.applications_for_job(&job_id).await?;
    println!("dashboard for {}:", job_id.0);
    for application in &dashboard {
        println!("{}", pretty(&application.status_view())?);
    }

    Ok(())
}

fn describe(result: &DeliveryResult) -> &'static str {
    match result {
        DeliveryResult::Delivered => "delivered",
        DeliveryResult::Skipped(_) => "skipped",
        DeliveryResult::Failed(_) => "failed",
    }
}

fn pretty<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for marketplace members (applicants and employers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

/// Status tracked throughout the candidate pipeline.
///
/// `Hired` and `Rejected` are near-terminal rather than terminal: a hire can
/// be undone back to `Rejected` or `Shortlisted`, and a rejection can be
/// reconsidered into `Reviewed` or `Shortlisted`. The exact edges live in
/// [`super::policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Interviewing,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Closed set of marketplace member roles.
///
/// Kept as a sum type so role-conditional branches are exhaustive matches
/// instead of stringly-typed ladders with a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Teacher,
    Student,
    School,
    Ngo,
    Family,
    Admin,
}

impl MemberRole {
    pub const fn label(self) -> &'static str {
        match self {
            MemberRole::Teacher => "teacher",
            MemberRole::Student => "student",
            MemberRole::School => "school",
            MemberRole::Ngo => "ngo",
            MemberRole::Family => "family",
            MemberRole::Admin => "admin",
        }
    }
}

/// One candidate's submission to one job posting.
///
/// `submitted_at` is stamped once at intake. `reviewed_at` and `hired_at`
/// are stamped the first time the status reaches `reviewed` / `hired` and
/// are never cleared afterwards, even if the status later moves away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_id: MemberId,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_at: Option<DateTime<Utc>>,
    pub cover_letter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_reference: Option<String>,
}

impl JobApplication {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            job_id: self.job_id.clone(),
            applicant_id: self.applicant_id.clone(),
            status: self.status.label(),
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
            reviewed_at: self.reviewed_at,
            hired_at: self.hired_at,
        }
    }
}

/// One posting owned by an employer (school, NGO, or family).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub employer_id: MemberId,
    pub employer_name: String,
    pub employer_role: MemberRole,
    pub title: String,
    pub is_filled: bool,
    pub is_active: bool,
}

impl JobPosting {
    /// A posting accepts new applications until it is deactivated or filled.
    pub fn accepts_applications(&self) -> bool {
        self.is_active && !self.is_filled
    }
}

/// Inbound intake payload, validated against the posting before storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub applicant_id: MemberId,
    pub cover_letter: String,
    #[serde(default)]
    pub resume_reference: Option<String>,
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub applicant_id: MemberId,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_at: Option<DateTime<Utc>>,
}

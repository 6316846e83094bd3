use super::domain::ApplicationStatus;

/// Statuses reachable in one step from `current`, excluding `current` itself.
///
/// The table mirrors the marketplace's review workflow as the product team
/// runs it today: early statuses fan out widely, while `hired` and
/// `rejected` keep narrow undo/reconsideration edges. Every status has a
/// non-empty allowed set; rejecting a disallowed request is the caller's
/// job, not this table's.
pub const fn allowed_transitions(current: ApplicationStatus) -> &'static [ApplicationStatus] {
    match current {
        ApplicationStatus::Pending => &[
            ApplicationStatus::Reviewed,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interviewing,
            ApplicationStatus::Hired,
            ApplicationStatus::Rejected,
        ],
        ApplicationStatus::Reviewed => &[
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interviewing,
            ApplicationStatus::Hired,
            ApplicationStatus::Rejected,
        ],
        ApplicationStatus::Shortlisted => &[
            ApplicationStatus::Reviewed,
            ApplicationStatus::Interviewing,
            ApplicationStatus::Hired,
            ApplicationStatus::Rejected,
        ],
        ApplicationStatus::Interviewing => &[
            ApplicationStatus::Reviewed,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Hired,
            ApplicationStatus::Rejected,
        ],
        ApplicationStatus::Hired => &[ApplicationStatus::Rejected, ApplicationStatus::Shortlisted],
        ApplicationStatus::Rejected => &[ApplicationStatus::Reviewed, ApplicationStatus::Shortlisted],
    }
}

/// A transition must change the status and follow a listed edge.
pub fn is_allowed(current: ApplicationStatus, requested: ApplicationStatus) -> bool {
    requested != current && allowed_transitions(current).contains(&requested)
}

//! Status derivation for jobs and their role-scoped reports.
//!
//! Everything here is computed from the current rows on every call. The
//! single-job and bulk readers share [`StatusBundle::derive`], so a job shows
//! the same statuses on its detail page and in any listing.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;
use crate::entity::job;
use crate::entity::report::{self, Entity as ReportEntity, ReportStatus, ReportType};

/// Progress of one participant (user or supervisor) on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ParticipantStatus {
    Pending,
    Submitted,
    Completed,
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParticipantStatus::Pending => "Pending",
            ParticipantStatus::Submitted => "Submitted",
            ParticipantStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Admin-facing approval state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum FinalStatus {
    Pending,
    #[serde(rename = "Verified by Admin")]
    VerifiedByAdmin,
    Approved,
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FinalStatus::Pending => "Pending",
            FinalStatus::VerifiedByAdmin => "Verified by Admin",
            FinalStatus::Approved => "Approved",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBundle {
    pub user: ParticipantStatus,
    pub supervisor: ParticipantStatus,
    #[serde(rename = "final")]
    pub final_status: FinalStatus,
    /// The job waits on the admin's final verification.
    pub ready: bool,
    pub summary: String,
}

impl StatusBundle {
    /// Derives every status of `job` from its reports. The first report of each
    /// type in `reports` is the one that counts.
    pub fn derive(job: &job::Model, reports: &[report::Model]) -> Self {
        let user_report = first_of_type(reports, ReportType::User);
        let supervisor_report = first_of_type(reports, ReportType::Supervisor);

        Self {
            user: participant_status(user_report),
            supervisor: participant_status(supervisor_report),
            final_status: final_status(job, supervisor_report),
            ready: is_ready_for_verification(job, user_report, supervisor_report),
            summary: progress_summary(job, user_report, supervisor_report),
        }
    }
}

pub fn first_of_type(reports: &[report::Model], report_type: ReportType) -> Option<&report::Model> {
    reports.iter().find(|r| r.report_type == report_type)
}

pub fn participant_status(report: Option<&report::Model>) -> ParticipantStatus {
    match report.map(|r| r.status) {
        None => ParticipantStatus::Pending,
        Some(ReportStatus::Pending) => ParticipantStatus::Submitted,
        Some(ReportStatus::Verified) => ParticipantStatus::Completed,
    }
}

pub fn final_status(job: &job::Model, supervisor_report: Option<&report::Model>) -> FinalStatus {
    if job.is_completed() {
        FinalStatus::Approved
    } else if supervisor_report.is_some_and(|r| r.is_verified()) {
        FinalStatus::VerifiedByAdmin
    } else {
        FinalStatus::Pending
    }
}

/// Gates the admin's verify action.
pub fn is_ready_for_verification(
    job: &job::Model,
    user_report: Option<&report::Model>,
    supervisor_report: Option<&report::Model>,
) -> bool {
    let user_verified = user_report.is_some_and(|r| r.is_verified());
    let supervisor_pending = supervisor_report.is_some_and(|r| r.status == ReportStatus::Pending);

    user_verified && supervisor_pending && !job.is_completed()
}

/// One-line description of what still blocks the job.
pub fn progress_summary(
    job: &job::Model,
    user_report: Option<&report::Model>,
    supervisor_report: Option<&report::Model>,
) -> String {
    if job.is_completed() {
        return "Completed".to_string();
    }

    let mut missing_steps = Vec::new();

    match user_report {
        None => missing_steps.push("User report not submitted"),
        Some(r) if !r.is_verified() => missing_steps.push("User report not verified by supervisor"),
        Some(_) => {}
    }

    match supervisor_report {
        None => missing_steps.push("Supervisor report not submitted"),
        Some(r) if !r.is_verified() => missing_steps.push("Supervisor report not verified"),
        Some(_) => {}
    }

    if missing_steps.is_empty() {
        "Ready for admin verification".to_string()
    } else {
        missing_steps.join(" | ")
    }
}

pub async fn derive_statuses<C: ConnectionTrait>(
    db: &C,
    job: &job::Model,
) -> Result<StatusBundle, DbErr> {
    let reports = ReportEntity::find()
        .filter(report::Column::JobId.eq(job.id))
        .order_by_asc(report::Column::Id)
        .all(db)
        .await?;

    Ok(StatusBundle::derive(job, &reports))
}

/// Same derivation as [`derive_statuses`] for many jobs, with one report query.
pub async fn derive_statuses_bulk<C: ConnectionTrait>(
    db: &C,
    jobs: &[job::Model],
) -> Result<BTreeMap<i32, StatusBundle>, DbErr> {
    if jobs.is_empty() {
        return Ok(BTreeMap::new());
    }

    let job_ids: Vec<i32> = jobs.iter().map(|j| j.id).collect();
    let reports = ReportEntity::find()
        .filter(report::Column::JobId.is_in(job_ids))
        .order_by_asc(report::Column::Id)
        .all(db)
        .await?;

    let mut by_job: HashMap<i32, Vec<report::Model>> = HashMap::new();
    for report in reports {
        by_job.entry(report.job_id).or_default().push(report);
    }

    Ok(jobs
        .iter()
        .map(|job| {
            let reports = by_job.get(&job.id).map(Vec::as_slice).unwrap_or(&[]);
            (job.id, StatusBundle::derive(job, reports))
        })
        .collect())
}

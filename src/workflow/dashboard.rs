use std::collections::{BTreeMap, HashSet};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use crate::entity::job;
use crate::entity::report::{self, Entity as ReportEntity, ReportStatus, ReportType};
use crate::entity::user::{self, Entity as UserEntity};
use crate::model::dashboard::{AdminDashboardResponse, SupervisorDashboardResponse, UserDashboardResponse};
use crate::model::job::JobWithStatusResponse;
use crate::model::report::ReportResponse;
use super::job::{jobs_for, list_jobs};
use super::status::{derive_statuses_bulk, StatusBundle};
use super::WorkflowError;

pub async fn admin_dashboard<C: ConnectionTrait>(db: &C) -> Result<AdminDashboardResponse, WorkflowError> {
    let jobs = list_jobs(db).await?;
    let statuses = derive_statuses_bulk(db, &jobs).await?;

    Ok(AdminDashboardResponse {
        jobs: with_statuses(jobs, statuses),
        total_users: UserEntity::find().count(db).await?,
        total_reports: ReportEntity::find().count(db).await?,
    })
}

pub async fn user_dashboard<C: ConnectionTrait>(
    db: &C,
    user: &user::Model,
) -> Result<UserDashboardResponse, WorkflowError> {
    let jobs = jobs_for(db, user).await?;
    let statuses = derive_statuses_bulk(db, &jobs).await?;

    let reports = ReportEntity::find()
        .filter(report::Column::SubmittedBy.eq(user.id))
        .order_by_asc(report::Column::Id)
        .all(db)
        .await?;

    let total_jobs = jobs.len();
    let completed_jobs = jobs.iter().filter(|j| j.is_completed()).count();

    Ok(UserDashboardResponse {
        jobs: with_statuses(jobs, statuses),
        reports: reports.into_iter().map(ReportResponse::from).collect(),
        total_jobs,
        completed_jobs,
        pending_jobs: total_jobs - completed_jobs,
    })
}

pub async fn supervisor_dashboard<C: ConnectionTrait>(
    db: &C,
    supervisor: &user::Model,
) -> Result<SupervisorDashboardResponse, WorkflowError> {
    let jobs = jobs_for(db, supervisor).await?;
    let statuses = derive_statuses_bulk(db, &jobs).await?;

    let job_ids: Vec<i32> = jobs.iter().map(|j| j.id).collect();
    let reports = if job_ids.is_empty() {
        Vec::new()
    } else {
        ReportEntity::find()
            .filter(report::Column::JobId.is_in(job_ids))
            .order_by_asc(report::Column::Id)
            .all(db)
            .await?
    };

    let (user_reports, supervisor_reports): (Vec<_>, Vec<_>) = reports
        .into_iter()
        .partition(|r| r.report_type == ReportType::User);

    let pending_user_reports = user_reports
        .iter()
        .filter(|r| r.status == ReportStatus::Pending)
        .count();

    let mut jobs_with_verified_user_report: Vec<i32> = user_reports
        .iter()
        .filter(|r| r.is_verified())
        .map(|r| r.job_id)
        .collect();
    jobs_with_verified_user_report.sort_unstable();
    jobs_with_verified_user_report.dedup();

    let supervised: HashSet<i32> = supervisor_reports.iter().map(|r| r.job_id).collect();
    let pending_jobs_to_supervise = jobs
        .iter()
        .filter(|j| jobs_with_verified_user_report.contains(&j.id) && !supervised.contains(&j.id))
        .count();

    Ok(SupervisorDashboardResponse {
        jobs: with_statuses(jobs, statuses),
        user_reports: user_reports.into_iter().map(ReportResponse::from).collect(),
        pending_user_reports,
        jobs_with_verified_user_report,
        pending_jobs_to_supervise,
    })
}

fn with_statuses(
    jobs: Vec<job::Model>,
    mut statuses: BTreeMap<i32, StatusBundle>,
) -> Vec<JobWithStatusResponse> {
    jobs.into_iter()
        .filter_map(|job| {
            statuses
                .remove(&job.id)
                .map(|bundle| JobWithStatusResponse::new(job, bundle))
        })
        .collect()
}

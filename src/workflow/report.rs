//! Report submission and the verification steps of the approval sequence.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};
use crate::entity::job::{self, JobStatus};
use crate::entity::report::{self, Entity as ReportEntity, ReportStatus, ReportType};
use crate::entity::user::{self, Role};
use super::job::find_job;
use super::permission::{authorize, Action};
use super::status::{first_of_type, is_ready_for_verification};
use super::error::Resource;
use super::WorkflowError;

pub async fn find_report<C: ConnectionTrait>(db: &C, report_id: i32) -> Result<report::Model, WorkflowError> {
    ReportEntity::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or(WorkflowError::NotFound(Resource::Report))
}

pub async fn reports_for_job<C: ConnectionTrait>(
    db: &C,
    job_id: i32,
) -> Result<Vec<report::Model>, WorkflowError> {
    Ok(ReportEntity::find()
        .filter(report::Column::JobId.eq(job_id))
        .order_by_asc(report::Column::Id)
        .all(db)
        .await?)
}

/// Files a report for `actor` against the job. The report type follows the
/// actor's role.
#[instrument(skip(db, actor, content), fields(actor_id = actor.id))]
pub async fn submit_report<C: ConnectionTrait>(
    db: &C,
    job_id: i32,
    actor: &user::Model,
    content: &str,
) -> Result<report::Model, WorkflowError> {
    authorize(actor.role, Action::SubmitReport)?;
    let job = find_job(db, job_id).await?;

    match actor.role {
        Role::User => submit_user_report(db, &job, actor, content).await,
        Role::Supervisor => submit_supervisor_report(db, &job, actor, content).await,
        Role::Admin => Err(WorkflowError::PermissionDenied("admins do not file reports")),
    }
}

pub async fn submit_user_report<C: ConnectionTrait>(
    db: &C,
    job: &job::Model,
    user: &user::Model,
    content: &str,
) -> Result<report::Model, WorkflowError> {
    if job.assigned_to != Some(user.id) {
        return Err(WorkflowError::PermissionDenied("job is not assigned to this user"));
    }

    insert_report(db, job, user, content, ReportType::User).await
}

/// Supervisor reports always start pending; only the admin verifies them.
pub async fn submit_supervisor_report<C: ConnectionTrait>(
    db: &C,
    job: &job::Model,
    supervisor: &user::Model,
    content: &str,
) -> Result<report::Model, WorkflowError> {
    if job.supervisor != Some(supervisor.id) {
        return Err(WorkflowError::PermissionDenied("job is not supervised by this account"));
    }

    insert_report(db, job, supervisor, content, ReportType::Supervisor).await
}

async fn insert_report<C: ConnectionTrait>(
    db: &C,
    job: &job::Model,
    submitter: &user::Model,
    content: &str,
    report_type: ReportType,
) -> Result<report::Model, WorkflowError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(WorkflowError::invalid("content", "Report content is required."));
    }

    let created = report::ActiveModel {
        job_id: Set(job.id),
        submitted_by: Set(submitter.id),
        content: Set(content.to_string()),
        report_type: Set(report_type),
        status: Set(ReportStatus::Pending),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(report_id = created.id, job_id = job.id, ?report_type, "report submitted");
    Ok(created)
}

/// Supervisor sign-off on a user report. Verifying a report twice leaves it
/// verified.
#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn supervisor_verify<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
    actor: &user::Model,
) -> Result<report::Model, WorkflowError> {
    authorize(actor.role, Action::SupervisorVerify)?;

    let report = find_report(db, report_id).await?;
    if report.report_type != ReportType::User {
        return Err(WorkflowError::invalid(
            "report",
            "Only user reports are verified by the supervisor.",
        ));
    }

    let job = find_job(db, report.job_id).await?;
    if job.supervisor != Some(actor.id) {
        return Err(WorkflowError::PermissionDenied("job is not supervised by this account"));
    }

    if report.status == ReportStatus::Verified {
        info!(report_id, "user report already verified");
        return Ok(report);
    }

    let mut active: report::ActiveModel = report.into();
    active.status = Set(ReportStatus::Verified);
    let updated = active.update(db).await?;

    info!(report_id, job_id = updated.job_id, "user report verified by supervisor");
    Ok(updated)
}

/// Admin decision on a supervisor report. Verifying it approves the job.
#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn admin_verify<C>(
    db: &C,
    report_id: i32,
    actor: &user::Model,
    target: ReportStatus,
) -> Result<report::Model, WorkflowError>
where
    C: ConnectionTrait + TransactionTrait,
{
    authorize(actor.role, Action::AdminVerify)?;
    verify_report(db, report_id, target).await
}

/// Sets the status of a supervisor report. `Verified` marks the job completed
/// in the same transaction.
///
/// Only supervisor reports are accepted, approval needs the job to be ready
/// for verification, and an approved job is frozen.
pub async fn verify_report<C>(
    db: &C,
    report_id: i32,
    target: ReportStatus,
) -> Result<report::Model, WorkflowError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let report = find_report(&txn, report_id).await?;
    if report.report_type != ReportType::Supervisor {
        return Err(WorkflowError::invalid(
            "report",
            "Only supervisor reports go to the admin for verification.",
        ));
    }

    let job = find_job(&txn, report.job_id).await?;
    if job.is_completed() {
        return Err(WorkflowError::invalid("job", "Job has already been approved."));
    }

    if target == ReportStatus::Verified {
        let reports = reports_for_job(&txn, job.id).await?;
        let user_report = first_of_type(&reports, ReportType::User);
        let supervisor_report = first_of_type(&reports, ReportType::Supervisor);

        if supervisor_report.map(|r| r.id) != Some(report.id)
            || !is_ready_for_verification(&job, user_report, supervisor_report)
        {
            return Err(WorkflowError::invalid("report", "Job is not ready for verification."));
        }
    }

    let mut active: report::ActiveModel = report.into();
    active.status = Set(target);
    let updated = active.update(&txn).await?;

    if target == ReportStatus::Verified {
        let mut job_active: job::ActiveModel = job.into();
        job_active.status = Set(JobStatus::Completed);
        job_active.update(&txn).await?;
    }

    txn.commit().await?;

    info!(report_id, job_id = updated.job_id, status = ?target, "report status updated by admin");
    Ok(updated)
}

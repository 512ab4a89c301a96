use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};
use crate::entity::job::{self, Entity as JobEntity, JobStatus};
use crate::entity::report::{self, Entity as ReportEntity};
use crate::entity::user::{self, Entity as UserEntity, Role};
use crate::model::job::{JobAllotmentRequest, JobCreateRequest};
use super::catalog::{find_job_title, OTHER_TITLE_CODE};
use super::error::Resource;
use super::WorkflowError;

pub async fn find_job<C: ConnectionTrait>(db: &C, job_id: i32) -> Result<job::Model, WorkflowError> {
    JobEntity::find_by_id(job_id)
        .one(db)
        .await?
        .ok_or(WorkflowError::NotFound(Resource::Job))
}

pub async fn list_jobs<C: ConnectionTrait>(db: &C) -> Result<Vec<job::Model>, WorkflowError> {
    Ok(JobEntity::find()
        .order_by_asc(job::Column::Id)
        .all(db)
        .await?)
}

/// Jobs the actor works on: all of them for admins.
pub async fn jobs_for<C: ConnectionTrait>(
    db: &C,
    actor: &user::Model,
) -> Result<Vec<job::Model>, WorkflowError> {
    let query = match actor.role {
        Role::Admin => JobEntity::find(),
        Role::User => JobEntity::find().filter(job::Column::AssignedTo.eq(actor.id)),
        Role::Supervisor => JobEntity::find().filter(job::Column::Supervisor.eq(actor.id)),
    };

    Ok(query.order_by_asc(job::Column::Id).all(db).await?)
}

#[instrument(skip(db, request))]
pub async fn create_job<C: ConnectionTrait>(
    db: &C,
    request: &JobCreateRequest,
) -> Result<job::Model, WorkflowError> {
    let title = resolve_title(db, request).await?;
    ensure_role(db, request.assigned_to, Role::User, "assignedTo").await?;
    ensure_role(db, request.supervisor, Role::Supervisor, "supervisor").await?;

    let created = job::ActiveModel {
        title: Set(title),
        description: Set(request.description.clone().unwrap_or_default()),
        assigned_to: Set(request.assigned_to),
        supervisor: Set(request.supervisor),
        status: Set(JobStatus::Pending),
        remark: Set(request.remark.clone().unwrap_or_default()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(job_id = created.id, title = %created.title, "job created");
    Ok(created)
}

#[instrument(skip(db, request))]
pub async fn allot_job<C: ConnectionTrait>(
    db: &C,
    job_id: i32,
    request: &JobAllotmentRequest,
) -> Result<job::Model, WorkflowError> {
    let job = find_job(db, job_id).await?;
    ensure_role(db, request.assigned_to, Role::User, "assignedTo").await?;
    ensure_role(db, request.supervisor, Role::Supervisor, "supervisor").await?;

    let mut active: job::ActiveModel = job.into();
    active.assigned_to = Set(request.assigned_to);
    active.supervisor = Set(request.supervisor);
    let updated = active.update(db).await?;

    info!(
        job_id = updated.id,
        assigned_to = ?updated.assigned_to,
        supervisor = ?updated.supervisor,
        "job allotted"
    );
    Ok(updated)
}

/// Deletes the job together with every report filed against it.
#[instrument(skip(db))]
pub async fn admin_delete_job<C>(db: &C, job_id: i32) -> Result<(), WorkflowError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let job = find_job(&txn, job_id).await?;

    let removed = ReportEntity::delete_many()
        .filter(report::Column::JobId.eq(job.id))
        .exec(&txn)
        .await?;
    JobEntity::delete_by_id(job.id).exec(&txn).await?;

    txn.commit().await?;

    info!(job_id, reports_removed = removed.rows_affected, "job deleted");
    Ok(())
}

async fn resolve_title<C: ConnectionTrait>(
    db: &C,
    request: &JobCreateRequest,
) -> Result<String, WorkflowError> {
    let code = request
        .title_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != OTHER_TITLE_CODE);

    if let Some(code) = code {
        return find_job_title(db, code)
            .await?
            .map(|t| t.name)
            .ok_or_else(|| WorkflowError::invalid("titleCode", "Select a valid job title."));
    }

    request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| WorkflowError::invalid("title", "Please provide a job title."))
}

async fn ensure_role<C: ConnectionTrait>(
    db: &C,
    user_id: Option<i32>,
    role: Role,
    field: &str,
) -> Result<(), WorkflowError> {
    let Some(user_id) = user_id else {
        return Ok(());
    };

    let account = UserEntity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| WorkflowError::invalid(field, "Selected account does not exist."))?;

    if account.role != role {
        let message = match role {
            Role::User => "Selected account is not a user.",
            Role::Supervisor => "Selected account is not a supervisor.",
            Role::Admin => "Selected account is not an admin.",
        };
        return Err(WorkflowError::invalid(field, message));
    }

    Ok(())
}

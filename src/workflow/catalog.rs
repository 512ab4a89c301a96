use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use crate::entity::job_title::{self, Entity as JobTitleEntity};
use crate::model::global_error::ValidationFieldError;
use super::WorkflowError;

/// Picking this code means the job title is typed in by hand.
pub const OTHER_TITLE_CODE: &str = "Other";

const MAX_CODE_LEN: usize = 50;
const MAX_NAME_LEN: usize = 255;

pub async fn list_job_titles<C: ConnectionTrait>(db: &C) -> Result<Vec<job_title::Model>, DbErr> {
    JobTitleEntity::find()
        .order_by_asc(job_title::Column::Id)
        .all(db)
        .await
}

pub async fn find_job_title<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> Result<Option<job_title::Model>, DbErr> {
    JobTitleEntity::find()
        .filter(job_title::Column::Code.eq(code))
        .one(db)
        .await
}

pub async fn add_job_title<C: ConnectionTrait>(
    db: &C,
    code: &str,
    name: &str,
) -> Result<job_title::Model, WorkflowError> {
    let code = code.trim();
    let name = name.trim();
    let mut errors = Vec::new();

    if code.is_empty() || code.len() > MAX_CODE_LEN {
        errors.push(ValidationFieldError::new("titleCode", "Title code must be 1-50 characters."));
    }
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        errors.push(ValidationFieldError::new("titleName", "Title name must be 1-255 characters."));
    }
    if !errors.is_empty() {
        return Err(WorkflowError::Validation(errors));
    }

    if find_job_title(db, code).await?.is_some() {
        return Err(WorkflowError::invalid("titleCode", "Title code already exists."));
    }

    let created = job_title::ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(code = %created.code, "job title added");
    Ok(created)
}

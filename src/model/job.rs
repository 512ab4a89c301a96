use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::entity::job::{self, JobStatus};
use crate::workflow::StatusBundle;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreateRequest {
    /// Free-text title, required unless `title_code` picks a catalog entry.
    pub title: Option<String>,
    /// Catalog code. "Other" falls back to `title`.
    pub title_code: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<i32>,
    pub supervisor: Option<i32>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobAllotmentRequest {
    pub assigned_to: Option<i32>,
    pub supervisor: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<i32>,
    pub supervisor: Option<i32>,
    pub status: JobStatus,
    pub remark: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<job::Model> for JobResponse {
    fn from(model: job::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            assigned_to: model.assigned_to,
            supervisor: model.supervisor,
            status: model.status,
            remark: model.remark,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobWithStatusResponse {
    pub job: JobResponse,
    pub statuses: StatusBundle,
}

impl JobWithStatusResponse {
    pub fn new(job: job::Model, statuses: StatusBundle) -> Self {
        Self {
            job: JobResponse::from(job),
            statuses,
        }
    }
}

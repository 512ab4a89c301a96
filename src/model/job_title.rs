use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::entity::job_title;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleCreateRequest {
    pub title_code: String,
    pub title_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<job_title::Model> for JobTitleResponse {
    fn from(model: job_title::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::entity::report::{self, ReportStatus, ReportType};
use crate::model::job::JobWithStatusResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportSubmitRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportVerifyRequest {
    pub status: ReportStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: i32,
    pub job_id: i32,
    pub submitted_by: i32,
    pub content: String,
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
}

impl From<report::Model> for ReportResponse {
    fn from(model: report::Model) -> Self {
        Self {
            id: model.id,
            job_id: model.job_id,
            submitted_by: model.submitted_by,
            content: model.content,
            report_type: model.report_type,
            status: model.status,
            submitted_at: model.submitted_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportDetailResponse {
    pub report: ReportResponse,
    pub job: JobWithStatusResponse,
}

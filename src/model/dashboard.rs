use serde::Serialize;
use utoipa::ToSchema;
use crate::model::job::JobWithStatusResponse;
use crate::model::report::ReportResponse;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardResponse {
    pub jobs: Vec<JobWithStatusResponse>,
    pub total_users: u64,
    pub total_reports: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboardResponse {
    pub jobs: Vec<JobWithStatusResponse>,
    pub reports: Vec<ReportResponse>,
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub pending_jobs: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorDashboardResponse {
    pub jobs: Vec<JobWithStatusResponse>,
    pub user_reports: Vec<ReportResponse>,
    /// User reports still waiting for this supervisor.
    pub pending_user_reports: usize,
    pub jobs_with_verified_user_report: Vec<i32>,
    /// Jobs whose user report is verified but with no supervisor report yet.
    pub pending_jobs_to_supervise: usize,
}

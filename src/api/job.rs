use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use crate::auth::current_user;
use crate::model::auth::Claims;
use crate::model::global_error::AppError;
use crate::model::job::{JobAllotmentRequest, JobCreateRequest, JobWithStatusResponse};
use crate::model::report::{ReportResponse, ReportSubmitRequest};
use crate::workflow::job::{admin_delete_job, allot_job, create_job as create_workflow_job, find_job, list_jobs};
use crate::workflow::permission::ensure_job_visible;
use crate::workflow::{authorize, derive_statuses, derive_statuses_bulk, submit_report as submit_workflow_report, Action};

#[utoipa::path(
    post,
    path = "/api/jobs",
    summary = "작업 생성",
    request_body = JobCreateRequest,
    responses(
        (status = 201, description = "작업 생성 성공", body = JobWithStatusResponse),
    ),
    tag = "jobs",
)]
#[post("/jobs")]
pub async fn create_job(
    body: web::Json<JobCreateRequest>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::CreateJob)?;

    let job = create_workflow_job(db.get_ref(), &body).await?;
    let statuses = derive_statuses(db.get_ref(), &job).await?;

    Ok(HttpResponse::Created().json(JobWithStatusResponse::new(job, statuses)))
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    summary = "전체 작업 및 진행 상태 조회",
    responses(
        (status = 200, description = "조회 성공", body = Vec<JobWithStatusResponse>),
    ),
    tag = "jobs",
)]
#[get("/jobs")]
pub async fn list_all_jobs(
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ViewAllJobs)?;

    let jobs = list_jobs(db.get_ref()).await?;
    let mut statuses = derive_statuses_bulk(db.get_ref(), &jobs).await?;

    let response: Vec<JobWithStatusResponse> = jobs
        .into_iter()
        .filter_map(|job| {
            statuses
                .remove(&job.id)
                .map(|bundle| JobWithStatusResponse::new(job, bundle))
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    summary = "작업 상세 및 진행 상태 조회",
    params(
        ("id", description = "작업 ID", example = 1),
    ),
    responses(
        (status = 200, description = "조회 성공", body = JobWithStatusResponse),
    ),
    tag = "jobs",
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ViewJob)?;

    let job = find_job(db.get_ref(), path.into_inner()).await?;
    ensure_job_visible(&actor, &job)?;
    let statuses = derive_statuses(db.get_ref(), &job).await?;

    Ok(HttpResponse::Ok().json(JobWithStatusResponse::new(job, statuses)))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}/allotment",
    summary = "작업 배정",
    request_body = JobAllotmentRequest,
    responses(
        (status = 200, description = "배정 성공", body = JobWithStatusResponse),
    ),
    tag = "jobs",
)]
#[put("/jobs/{id}/allotment")]
pub async fn allot(
    path: web::Path<i32>,
    body: web::Json<JobAllotmentRequest>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::AllotJob)?;

    let job = allot_job(db.get_ref(), path.into_inner(), &body).await?;
    let statuses = derive_statuses(db.get_ref(), &job).await?;

    Ok(HttpResponse::Ok().json(JobWithStatusResponse::new(job, statuses)))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    summary = "작업 삭제 (보고서 포함)",
    responses(
        (status = 204, description = "삭제 성공"),
    ),
    tag = "jobs",
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::DeleteJob)?;

    admin_delete_job(db.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/reports",
    summary = "보고서 제출",
    request_body = ReportSubmitRequest,
    responses(
        (status = 201, description = "제출 성공", body = ReportResponse),
    ),
    tag = "reports",
)]
#[post("/jobs/{id}/reports")]
pub async fn submit_report(
    path: web::Path<i32>,
    body: web::Json<ReportSubmitRequest>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;

    let report = submit_workflow_report(db.get_ref(), path.into_inner(), &actor, &body.content).await?;

    Ok(HttpResponse::Created().json(ReportResponse::from(report)))
}

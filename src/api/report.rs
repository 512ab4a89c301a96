use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use crate::auth::current_user;
use crate::model::auth::Claims;
use crate::model::global_error::AppError;
use crate::model::job::JobWithStatusResponse;
use crate::model::report::{ReportDetailResponse, ReportResponse, ReportVerifyRequest};
use crate::workflow::job::find_job;
use crate::workflow::permission::ensure_job_visible;
use crate::workflow::report::{admin_verify, find_report, supervisor_verify};
use crate::workflow::{authorize, derive_statuses, Action};

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    summary = "보고서 상세 조회",
    responses(
        (status = 200, description = "조회 성공", body = ReportDetailResponse),
    ),
    tag = "reports",
)]
#[get("/reports/{id}")]
pub async fn get_report(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ViewReport)?;

    let report = find_report(db.get_ref(), path.into_inner()).await?;
    let job = find_job(db.get_ref(), report.job_id).await?;
    ensure_job_visible(&actor, &job)?;
    let statuses = derive_statuses(db.get_ref(), &job).await?;

    Ok(HttpResponse::Ok().json(ReportDetailResponse {
        report: ReportResponse::from(report),
        job: JobWithStatusResponse::new(job, statuses),
    }))
}

#[utoipa::path(
    post,
    path = "/api/reports/{id}/supervisor-verify",
    summary = "감독자의 사용자 보고서 확인",
    responses(
        (status = 200, description = "확인 성공", body = ReportResponse),
    ),
    tag = "reports",
)]
#[post("/reports/{id}/supervisor-verify")]
pub async fn verify_by_supervisor(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;

    let report = supervisor_verify(db.get_ref(), path.into_inner(), &actor).await?;

    Ok(HttpResponse::Ok().json(ReportResponse::from(report)))
}

#[utoipa::path(
    post,
    path = "/api/reports/{id}/verify",
    summary = "관리자의 감독자 보고서 최종 승인",
    request_body = ReportVerifyRequest,
    responses(
        (status = 200, description = "상태 변경 성공", body = ReportResponse),
    ),
    tag = "reports",
)]
#[post("/reports/{id}/verify")]
pub async fn verify_by_admin(
    path: web::Path<i32>,
    body: web::Json<ReportVerifyRequest>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;

    let report = admin_verify(db.get_ref(), path.into_inner(), &actor, body.status).await?;

    Ok(HttpResponse::Ok().json(ReportResponse::from(report)))
}

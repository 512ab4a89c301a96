use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use crate::auth::current_user;
use crate::model::auth::Claims;
use crate::model::global_error::AppError;
use crate::model::job_title::{JobTitleCreateRequest, JobTitleResponse};
use crate::workflow::catalog::{add_job_title, list_job_titles};
use crate::workflow::{authorize, Action};

#[utoipa::path(
    get,
    path = "/api/job-titles",
    summary = "작업 제목 목록 조회",
    responses(
        (status = 200, description = "조회 성공", body = Vec<JobTitleResponse>),
    ),
    tag = "job titles",
)]
#[get("/job-titles")]
pub async fn list_titles(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let titles: Vec<JobTitleResponse> = list_job_titles(db.get_ref())
        .await?
        .into_iter()
        .map(JobTitleResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(titles))
}

#[utoipa::path(
    post,
    path = "/api/job-titles",
    summary = "작업 제목 추가",
    request_body = JobTitleCreateRequest,
    responses(
        (status = 201, description = "추가 성공", body = JobTitleResponse),
    ),
    tag = "job titles",
)]
#[post("/job-titles")]
pub async fn create_title(
    body: web::Json<JobTitleCreateRequest>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ManageTitles)?;

    let title = add_job_title(db.get_ref(), &body.title_code, &body.title_name).await?;

    Ok(HttpResponse::Created().json(JobTitleResponse::from(title)))
}

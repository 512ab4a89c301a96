use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;
use crate::auth::current_user;
use crate::model::auth::Claims;
use crate::model::dashboard::{AdminDashboardResponse, SupervisorDashboardResponse, UserDashboardResponse};
use crate::model::global_error::AppError;
use crate::workflow::{authorize, dashboard, Action};

#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    summary = "관리자 대시보드",
    responses(
        (status = 200, description = "조회 성공", body = AdminDashboardResponse),
    ),
    tag = "dashboard",
)]
#[get("/dashboard/admin")]
pub async fn admin_dashboard(
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ViewAdminDashboard)?;

    Ok(HttpResponse::Ok().json(dashboard::admin_dashboard(db.get_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/user",
    summary = "사용자 대시보드",
    responses(
        (status = 200, description = "조회 성공", body = UserDashboardResponse),
    ),
    tag = "dashboard",
)]
#[get("/dashboard/user")]
pub async fn user_dashboard(
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ViewUserDashboard)?;

    Ok(HttpResponse::Ok().json(dashboard::user_dashboard(db.get_ref(), &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/supervisor",
    summary = "감독자 대시보드",
    responses(
        (status = 200, description = "조회 성공", body = SupervisorDashboardResponse),
    ),
    tag = "dashboard",
)]
#[get("/dashboard/supervisor")]
pub async fn supervisor_dashboard(
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ViewSupervisorDashboard)?;

    Ok(HttpResponse::Ok().json(dashboard::supervisor_dashboard(db.get_ref(), &actor).await?))
}

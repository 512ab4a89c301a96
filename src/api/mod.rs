mod auth;
mod dashboard;
mod health;
mod job;
mod job_title;
mod report;
mod user;

use actix_web::web::{scope, ServiceConfig};
use utoipa::OpenApi;
use crate::auth::AuthMiddleware;

pub use crate::api::auth::{login, logout, refresh_token, get_me};
pub use crate::api::dashboard::{admin_dashboard, supervisor_dashboard, user_dashboard};
pub use crate::api::health::health_check;
pub use crate::api::job::{allot, create_job, delete_job, get_job, list_all_jobs, submit_report};
pub use crate::api::job_title::{create_title, list_titles};
pub use crate::api::report::{get_report, verify_by_admin, verify_by_supervisor};
pub use crate::api::user::{create_user, lookup_user, reset_password, search_user};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        auth::refresh_token,
        auth::get_me,
        user::create_user,
        user::search_user,
        user::lookup_user,
        user::reset_password,
        job_title::list_titles,
        job_title::create_title,
        job::create_job,
        job::list_all_jobs,
        job::get_job,
        job::allot,
        job::delete_job,
        job::submit_report,
        report::get_report,
        report::verify_by_supervisor,
        report::verify_by_admin,
        dashboard::admin_dashboard,
        dashboard::user_dashboard,
        dashboard::supervisor_dashboard,
    ),
    tags(
        (name = "jobs", description = "작업 생성, 배정, 삭제"),
        (name = "reports", description = "보고서 제출 및 승인 흐름"),
    ),
)]
pub struct ApiDoc;

/// Registers every route. Everything under `/api` requires a valid access token.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(health_check)
        .service(login)
        .service(logout)
        .service(refresh_token)
        .service(
            scope("/api")
                .wrap(AuthMiddleware)
                .service(get_me)
                .service(create_user)
                .service(search_user)
                .service(lookup_user)
                .service(reset_password)
                .service(list_titles)
                .service(create_title)
                .service(create_job)
                .service(list_all_jobs)
                .service(get_job)
                .service(allot)
                .service(delete_job)
                .service(submit_report)
                .service(get_report)
                .service(verify_by_supervisor)
                .service(verify_by_admin)
                .service(admin_dashboard)
                .service(user_dashboard)
                .service(supervisor_dashboard));
}

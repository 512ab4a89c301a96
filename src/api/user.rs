use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use crate::auth::current_user;
use crate::model::auth::{Claims, UserResponse};
use crate::model::global_error::AppError;
use crate::model::user::{PasswordResetRequest, UserCreateRequest, UserLookupQuery, UserLookupResponse, UserSearchQuery};
use crate::workflow::account::{create_user as create_account, AccountSettings};
use crate::workflow::{authorize, reset_credential, resolve_user, Action};

#[utoipa::path(
    post,
    path = "/api/users",
    summary = "사용자 생성",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "사용자 생성 성공", body = UserResponse),
    ),
    tag = "users",
)]
#[post("/users")]
pub async fn create_user(
    body: web::Json<UserCreateRequest>,
    db: web::Data<DatabaseConnection>,
    settings: web::Data<AccountSettings>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::CreateUser)?;

    let user = create_account(db.get_ref(), &body, &settings).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    summary = "사용자 검색 (사용자 코드 → 사용자명 → ID 순)",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "사용자 조회 성공", body = UserResponse),
        (status = 404, description = "사용자를 찾을 수 없음"),
    ),
    tag = "users",
)]
#[get("/users/search")]
pub async fn search_user(
    query: web::Query<UserSearchQuery>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::SearchUsers)?;

    let user = resolve_user(db.get_ref(), &query.q).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/lookup",
    summary = "사용자 간단 조회",
    params(UserLookupQuery),
    responses(
        (status = 200, description = "조회 결과 (없으면 success = false)", body = UserLookupResponse),
    ),
    tag = "users",
)]
#[get("/users/lookup")]
pub async fn lookup_user(
    query: web::Query<UserLookupQuery>,
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::SearchUsers)?;

    match resolve_user(db.get_ref(), &query.identifier).await {
        Ok(user) => Ok(HttpResponse::Ok().json(UserLookupResponse::found(&user))),
        Err(err) if err.is_not_found() => Ok(HttpResponse::Ok().json(UserLookupResponse::not_found())),
        Err(err) => Err(err.into()),
    }
}

#[utoipa::path(
    post,
    path = "/api/users/reset-password",
    summary = "비밀번호 초기화",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "초기화 결과 (없으면 success = false)", body = UserLookupResponse),
    ),
    tag = "users",
)]
#[post("/users/reset-password")]
pub async fn reset_password(
    body: web::Json<PasswordResetRequest>,
    db: web::Data<DatabaseConnection>,
    settings: web::Data<AccountSettings>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let actor = current_user(db.get_ref(), &claims).await?;
    authorize(actor.role, Action::ResetPassword)?;

    let user = match resolve_user(db.get_ref(), &body.identifier).await {
        Ok(user) => user,
        Err(err) if err.is_not_found() => {
            return Ok(HttpResponse::Ok().json(UserLookupResponse::not_found()));
        }
        Err(err) => return Err(err.into()),
    };

    reset_credential(db.get_ref(), &user, &settings).await?;

    Ok(HttpResponse::Ok().json(UserLookupResponse::found(&user)))
}

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use sea_orm::DatabaseConnection;
use crate::auth::current_user;
use crate::auth::jwt::{
    build_access_token_cookie, build_refresh_token_cookie, build_removal_cookie, is_refresh_claims,
    JwtUtils, TokenVerifyResult, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::model::auth::{Claims, LoginRequest, UserResponse};
use crate::model::global_error::{AppError, ErrorCode, ValidationFieldError};
use crate::workflow::account::{authenticate, find_user};

#[utoipa::path(
    post,
    path = "/auth/login",
    summary = "로그인",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = UserResponse),
        (status = 400, description = "잘못된 자격 증명 또는 역할"),
    ),
    tag = "auth",
)]
#[post("/auth/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
    jwt: web::Data<JwtUtils>,
) -> Result<HttpResponse, AppError> {
    validate_login_request(&body.username, &body.password)?;

    let user = authenticate(db.get_ref(), &body.username, &body.password, body.role).await?;

    let access_token = jwt.generate_token(user.id, user.role)?;
    let refresh_token_str = jwt.generate_refresh_token(user.id)?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), "로그인 성공");

    Ok(HttpResponse::Ok()
        .cookie(build_access_token_cookie(&access_token))
        .cookie(build_refresh_token_cookie(&refresh_token_str))
        .json(UserResponse::from(user))
    )
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    summary = "로그아웃",
    responses(
        (status = 204, description = "로그아웃 성공"),
    ),
    tag = "auth",
)]
#[post("/auth/logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::NoContent()
        .cookie(build_removal_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(build_removal_cookie(REFRESH_TOKEN_COOKIE))
        .finish()
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    summary = "액세스 토큰 재발급",
    responses(
        (status = 200, description = "재발급 성공"),
        (status = 401, description = "리프레시 토큰이 유효하지 않음"),
    ),
    tag = "auth",
)]
#[post("/auth/refresh")]
pub async fn refresh_token(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    jwt: web::Data<JwtUtils>,
) -> Result<HttpResponse, AppError> {
    let refresh_token_cookie = req.cookie(REFRESH_TOKEN_COOKIE)
        .ok_or_else(|| AppError::unauthorized(ErrorCode::InvalidAuthToken))?;

    match jwt.verify_token(refresh_token_cookie.value()) {
        TokenVerifyResult::Valid(claims) => {
            if !is_refresh_claims(&claims) {
                return Err(AppError::unauthorized(ErrorCode::NotRefreshToken));
            }

            let user_id = claims.user_id()
                .ok_or_else(|| AppError::unauthorized(ErrorCode::InvalidRefreshToken))?;

            let user = find_user(db.get_ref(), user_id).await?;
            let new_access_token = jwt.generate_token(user.id, user.role)?;

            Ok(HttpResponse::Ok()
                .cookie(build_access_token_cookie(&new_access_token))
                .finish())
        }
        TokenVerifyResult::Expired | TokenVerifyResult::Invalid => {
            Err(AppError::unauthorized(ErrorCode::InvalidRefreshToken))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    summary = "내 정보 조회",
    responses(
        (status = 200, description = "조회 성공", body = UserResponse),
    ),
    tag = "auth",
)]
#[get("/auth/me")]
pub async fn get_me(
    db: web::Data<DatabaseConnection>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user = current_user(db.get_ref(), &claims).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

fn validate_login_request(username: &str, password: &str) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if username.trim().is_empty() {
        errors.push(ValidationFieldError::new("username", "Username is required."));
    }

    if password.is_empty() {
        errors.push(ValidationFieldError::new("password", "Password is required."));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}

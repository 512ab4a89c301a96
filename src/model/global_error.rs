use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use std::fmt;
use utoipa::ToSchema;
use crate::workflow::error::Resource;
use crate::workflow::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    ValidationError,
    DuplicateUsername,
    InvalidCredentials,
    NotRefreshToken,
    InvalidRefreshToken,

    // 401 UNAUTHORIZED
    AuthenticationFailed,
    ExpiredAuthToken,
    InvalidAuthToken,

    // 403 FORBIDDEN
    NotEnoughPermission,

    // 404 NOT FOUND
    MemberNotFound,
    JobNotFound,
    ReportNotFound,

    // 500 SERVER ERRORS
    DatabaseError,
    InternalError,
    TokenGenerationFailed,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "유효성 검증에 실패했습니다",
            ErrorCode::DuplicateUsername => "이미 사용 중인 사용자명입니다",
            ErrorCode::InvalidCredentials => "잘못된 자격 증명 또는 역할입니다",
            ErrorCode::NotRefreshToken => "잘못된 리프레시 토큰입니다",
            ErrorCode::InvalidRefreshToken => "리프레시 토큰이 유효하지 않습니다",

            ErrorCode::AuthenticationFailed => "인증에 실패했습니다",
            ErrorCode::ExpiredAuthToken => "로그인 토큰이 만료되었습니다",
            ErrorCode::InvalidAuthToken => "유효하지 않은 로그인 토큰입니다",

            ErrorCode::NotEnoughPermission => "권한이 부족합니다",

            ErrorCode::MemberNotFound => "사용자를 찾을 수 없습니다",
            ErrorCode::JobNotFound => "유효하지 않은 작업 ID입니다",
            ErrorCode::ReportNotFound => "유효하지 않은 보고서 ID입니다",

            ErrorCode::DatabaseError => "데이터베이스 오류가 발생했습니다",
            ErrorCode::InternalError => "내부 서버 오류가 발생했습니다",
            ErrorCode::TokenGenerationFailed => "토큰 생성에 실패했습니다",
        }
    }

    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::InvalidRefreshToken |
            ErrorCode::NotRefreshToken |
            ErrorCode::InvalidCredentials |
            ErrorCode::ValidationError |
            ErrorCode::DuplicateUsername => StatusCode::BAD_REQUEST,

            ErrorCode::AuthenticationFailed |
            ErrorCode::ExpiredAuthToken |
            ErrorCode::InvalidAuthToken => StatusCode::UNAUTHORIZED,

            ErrorCode::NotEnoughPermission => StatusCode::FORBIDDEN,

            ErrorCode::MemberNotFound |
            ErrorCode::JobNotFound |
            ErrorCode::ReportNotFound => StatusCode::NOT_FOUND,

            ErrorCode::DatabaseError |
            ErrorCode::InternalError |
            ErrorCode::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl ValidationFieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),

    #[error("유효성 검증에 실패했습니다")]
    ValidationError(Vec<ValidationFieldError>),
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn with_detail(code: ErrorCode, detail: String) -> Self {
        AppError::ApiError(code, Some(detail))
    }

    pub fn bad_request(code: ErrorCode) -> Self {
        Self::new(code)
    }

    pub fn unauthorized(code: ErrorCode) -> Self {
        Self::new(code)
    }

    pub fn forbidden(code: ErrorCode) -> Self {
        Self::new(code)
    }

    pub fn not_found(code: ErrorCode) -> Self {
        Self::new(code)
    }

    pub fn internal_error(code: ErrorCode) -> Self {
        Self::new(code)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ApiError(code, _) => *code,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        tracing::error!("데이터베이스 오류 발생: {}", err);
        AppError::new(ErrorCode::DatabaseError)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!("토큰 생성 실패: {}", err);
        AppError::new(ErrorCode::TokenGenerationFailed)
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(errors) => AppError::ValidationError(errors),
            WorkflowError::NotFound(resource) => AppError::not_found(match resource {
                Resource::User => ErrorCode::MemberNotFound,
                Resource::Job => ErrorCode::JobNotFound,
                Resource::Report => ErrorCode::ReportNotFound,
            }),
            WorkflowError::PermissionDenied(reason) => {
                AppError::with_detail(ErrorCode::NotEnoughPermission, reason.to_string())
            }
            WorkflowError::InvalidCredentials => AppError::bad_request(ErrorCode::InvalidCredentials),
            WorkflowError::DuplicateUsername => AppError::bad_request(ErrorCode::DuplicateUsername),
            WorkflowError::Database(err) => err.into(),
            WorkflowError::Credential(err) => {
                tracing::error!("비밀번호 해시 처리 실패: {}", err);
                AppError::internal_error(ErrorCode::InternalError)
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationFieldError>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.code().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let response = match self {
            AppError::ApiError(code, detail) => ErrorResponse {
                code: format!("{:?}", code),
                message: code.message().to_string(),
                detail: detail.clone(),
                errors: Vec::new(),
            },
            AppError::ValidationError(errors) => ErrorResponse {
                code: format!("{:?}", ErrorCode::ValidationError),
                message: ErrorCode::ValidationError.message().to_string(),
                detail: None,
                errors: errors.clone(),
            },
        };

        HttpResponse::build(self.status_code())
            .json(response)
    }
}

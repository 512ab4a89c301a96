use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};

use super::jwt::{is_refresh_claims, JwtUtils, TokenVerifyResult, ACCESS_TOKEN_COOKIE};
use crate::model::auth::Claims;
use crate::model::global_error::{AppError, ErrorCode};

/// Puts the caller's [`Claims`] into the request extensions or rejects the request.
pub struct AuthMiddleware;

// 미들웨어 팩토리
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(err) => Box::pin(async move { Err(err.into()) }),
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let jwt = req
        .app_data::<web::Data<JwtUtils>>()
        .ok_or_else(|| AppError::internal_error(ErrorCode::InternalError))?;

    // 쿠키 우선, 없으면 Authorization 헤더
    let token = match req.cookie(ACCESS_TOKEN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string)
            .ok_or_else(|| AppError::unauthorized(ErrorCode::AuthenticationFailed))?,
    };

    match jwt.verify_token(&token) {
        TokenVerifyResult::Valid(claims) if !is_refresh_claims(&claims) => Ok(claims),
        TokenVerifyResult::Valid(_) | TokenVerifyResult::Invalid => {
            Err(AppError::unauthorized(ErrorCode::InvalidAuthToken))
        }
        TokenVerifyResult::Expired => Err(AppError::unauthorized(ErrorCode::ExpiredAuthToken)),
    }
}

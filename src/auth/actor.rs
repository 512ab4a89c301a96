use sea_orm::DatabaseConnection;
use crate::entity::user;
use crate::model::auth::Claims;
use crate::model::global_error::{AppError, ErrorCode};
use crate::workflow::account::find_user;

/// Loads the account behind the request's claims. A token whose role no longer
/// matches the stored account is rejected.
pub async fn current_user(db: &DatabaseConnection, claims: &Claims) -> Result<user::Model, AppError> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::unauthorized(ErrorCode::InvalidAuthToken))?;

    let user = find_user(db, user_id)
        .await
        .map_err(|err| {
            if err.is_not_found() {
                AppError::unauthorized(ErrorCode::AuthenticationFailed)
            } else {
                err.into()
            }
        })?;

    if user.role.as_str() != claims.role {
        return Err(AppError::unauthorized(ErrorCode::InvalidAuthToken));
    }

    Ok(user)
}

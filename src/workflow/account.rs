use bcrypt::{hash, verify, DEFAULT_COST};
use rand::distr::Alphanumeric;
use rand::Rng;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::{info, instrument, warn};
use crate::entity::user::{self, Entity as UserEntity, Role};
use crate::model::global_error::ValidationFieldError;
use crate::model::user::{UserCreateRequest, DEPARTMENT_CODES, DESIGNATIONS};
use super::error::Resource;
use super::WorkflowError;

const USER_CODE_PREFIX: char = 'U';
const USER_CODE_SUFFIX_LEN: usize = 5;
const USER_CODE_ATTEMPTS: usize = 10;
const MIN_PASSWORD_LEN: usize = 8;

/// Credential handling shared by account creation and password reset.
#[derive(Debug, Clone)]
pub struct AccountSettings {
    /// Value written by [`reset_credential`]. Known to staff, so weak.
    pub reset_password: String,
    pub hash_cost: u32,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            reset_password: "changeme123".to_string(),
            hash_cost: DEFAULT_COST,
        }
    }
}

/// Resolves a user by user code, then username, then numeric id.
///
/// Every lookup surface (search, password reset, JSON lookup) goes through
/// here so they agree on which account an identifier means.
pub async fn resolve_user<C: ConnectionTrait>(
    db: &C,
    identifier: &str,
) -> Result<user::Model, WorkflowError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(WorkflowError::NotFound(Resource::User));
    }

    if let Some(found) = UserEntity::find()
        .filter(user::Column::UserCode.eq(identifier))
        .one(db)
        .await?
    {
        return Ok(found);
    }

    if let Some(found) = UserEntity::find()
        .filter(user::Column::Username.eq(identifier))
        .one(db)
        .await?
    {
        return Ok(found);
    }

    if let Ok(id) = identifier.parse::<i32>() {
        if let Some(found) = UserEntity::find_by_id(id).one(db).await? {
            return Ok(found);
        }
    }

    Err(WorkflowError::NotFound(Resource::User))
}

pub async fn find_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<user::Model, WorkflowError> {
    UserEntity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(WorkflowError::NotFound(Resource::User))
}

/// Overwrites the user's password with the configured default.
#[instrument(skip(db, settings), fields(user_id = user.id))]
pub async fn reset_credential<C: ConnectionTrait>(
    db: &C,
    user: &user::Model,
    settings: &AccountSettings,
) -> Result<(), WorkflowError> {
    let hashed_password = hash(&settings.reset_password, settings.hash_cost)?;

    let mut active: user::ActiveModel = user.clone().into();
    active.password = Set(hashed_password);
    active.update(db).await?;

    warn!(username = %user.username, "password reset to the default credential");
    Ok(())
}

/// Checks username, password and the role the caller claims to log in as.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
    role: Role,
) -> Result<user::Model, WorkflowError> {
    let user = UserEntity::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
        .ok_or(WorkflowError::InvalidCredentials)?;

    if !verify(password, &user.password)? || user.role != role {
        return Err(WorkflowError::InvalidCredentials);
    }

    Ok(user)
}

#[instrument(skip(db, request, settings), fields(username = %request.username, role = request.role.as_str()))]
pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    request: &UserCreateRequest,
    settings: &AccountSettings,
) -> Result<user::Model, WorkflowError> {
    validate_user_request(request)?;

    let username = request.username.trim();
    let existing = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(WorkflowError::DuplicateUsername);
    }

    let user_code = generate_user_code(db).await?;
    let hashed_password = hash(&request.password, settings.hash_cost)?;

    let created = user::ActiveModel {
        user_code: Set(user_code),
        username: Set(username.to_string()),
        email: Set(request.email.trim().to_string()),
        password: Set(hashed_password),
        role: Set(request.role),
        department_code: Set(non_blank(&request.department_code)),
        department_name: Set(non_blank(&request.department_name)),
        designation: Set(non_blank(&request.designation)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = created.id, user_code = %created.user_code, "user created");
    Ok(created)
}

fn validate_user_request(request: &UserCreateRequest) -> Result<(), WorkflowError> {
    let mut errors = Vec::new();

    if request.username.trim().is_empty() {
        errors.push(ValidationFieldError::new("username", "Username is required."));
    }

    if request.email.trim().is_empty() {
        errors.push(ValidationFieldError::new("email", "Email is required."));
    } else if !request.email.contains('@') {
        errors.push(ValidationFieldError::new("email", "Enter a valid email address."));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        errors.push(ValidationFieldError::new(
            "password",
            "Password must be at least 8 characters.",
        ));
    }

    if let Some(code) = non_blank(&request.department_code) {
        if !DEPARTMENT_CODES.contains(&code.as_str()) {
            errors.push(ValidationFieldError::new("departmentCode", "Select a valid department."));
        }
    }

    if let Some(designation) = non_blank(&request.designation) {
        if !DESIGNATIONS.contains(&designation.as_str()) {
            errors.push(ValidationFieldError::new("designation", "Select a valid designation."));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::Validation(errors))
    }
}

async fn generate_user_code<C: ConnectionTrait>(db: &C) -> Result<String, WorkflowError> {
    for _ in 0..USER_CODE_ATTEMPTS {
        let code = random_user_code();
        let taken = UserEntity::find()
            .filter(user::Column::UserCode.eq(&code))
            .one(db)
            .await?;
        if taken.is_none() {
            return Ok(code);
        }
    }

    Err(sea_orm::DbErr::Custom("could not allocate a unique user code".to_string()).into())
}

fn random_user_code() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(USER_CODE_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{}{}", USER_CODE_PREFIX, suffix)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UserCreateRequest {
        UserCreateRequest {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "long-enough".to_string(),
            role: Role::User,
            department_code: Some("IT".to_string()),
            department_name: None,
            designation: Some("Staff".to_string()),
        }
    }

    #[test]
    fn user_codes_are_prefixed_and_short() {
        let code = random_user_code();
        assert_eq!(code.len(), 6);
        assert!(code.starts_with('U'));
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_user_request(&request()).is_ok());
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let mut bad = request();
        bad.username = " ".to_string();
        bad.email = "nope".to_string();
        bad.password = "short".to_string();
        bad.department_code = Some("OPS".to_string());

        match validate_user_request(&bad) {
            Err(WorkflowError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["username", "email", "password", "departmentCode"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn blank_optional_fields_become_none() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some(" HR ".to_string())), Some("HR".to_string()));
    }
}

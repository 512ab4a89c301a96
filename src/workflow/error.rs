use std::fmt;
use sea_orm::DbErr;
use thiserror::Error;
use crate::model::global_error::ValidationFieldError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<ValidationFieldError>),

    #[error("{0} not found")]
    NotFound(Resource),

    #[error("permission denied: {0}")]
    PermissionDenied(&'static str),

    #[error("invalid credentials or role")]
    InvalidCredentials,

    #[error("username already taken")]
    DuplicateUsername,

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Credential(#[from] bcrypt::BcryptError),
}

impl WorkflowError {
    pub fn invalid(field: &str, message: &str) -> Self {
        WorkflowError::Validation(vec![ValidationFieldError::new(field, message)])
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkflowError::NotFound(_))
    }
}

/// Kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Job,
    Report,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::User => "user",
            Resource::Job => "job",
            Resource::Report => "report",
        };
        f.write_str(name)
    }
}

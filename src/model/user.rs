use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use crate::entity::user::{self, Role};

pub const DEPARTMENT_CODES: [&str; 4] = ["HR", "IT", "FIN", "MKT"];
pub const DESIGNATIONS: [&str; 3] = ["Manager", "Executive", "Staff"];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department_code: Option<String>,
    pub department_name: Option<String>,
    pub designation: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserSearchQuery {
    /// 사용자 코드, 사용자명 또는 숫자 ID
    pub q: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserLookupQuery {
    pub identifier: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    pub identifier: String,
}

/// Shape shared by the lookup and password reset endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserLookupResponse {
    pub success: bool,
    pub name: Option<String>,
    pub department: Option<String>,
    pub error: Option<String>,
}

impl UserLookupResponse {
    pub fn found(user: &user::Model) -> Self {
        Self {
            success: true,
            name: Some(user.username.clone()),
            department: user
                .department_name
                .clone()
                .or_else(|| user.department_code.clone()),
            error: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            success: false,
            name: None,
            department: None,
            error: Some("User not found".to_string()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::entity::user::{self, Role};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Claims {
    pub sub: String,      // 사용자 ID
    pub role: String,     // 사용자 역할
    pub exp: usize,       // 만료 시간 (Unix timestamp)
    pub iat: usize,       // 발행 시간 (Unix timestamp)
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub user_code: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub department_code: Option<String>,
    pub department_name: Option<String>,
    pub designation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            user_code: model.user_code,
            username: model.username,
            email: model.email,
            role: model.role,
            department_code: model.department_code,
            department_name: model.department_name,
            designation: model.designation,
            created_at: model.created_at,
        }
    }
}

pub mod auth;
pub mod dashboard;
pub mod global_error;
pub mod job;
pub mod job_title;
pub mod report;
pub mod user;

pub use auth::{Claims, LoginRequest, UserResponse};

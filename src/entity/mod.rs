pub mod job;
pub mod job_title;
pub mod report;
pub mod user;

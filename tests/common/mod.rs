#![allow(dead_code)]

use job_allotment::entity::job;
use job_allotment::entity::user::{self, Role};
use job_allotment::migration::{Migrator, MigratorTrait};
use job_allotment::model::job::JobCreateRequest;
use job_allotment::model::user::UserCreateRequest;
use job_allotment::workflow::account::{create_user, AccountSettings};
use job_allotment::workflow::job::create_job;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub fn account_settings() -> AccountSettings {
    AccountSettings {
        reset_password: "reset-me-now".to_string(),
        hash_cost: 4,
    }
}

/// Fresh in-memory database with every migration applied. A single pooled
/// connection keeps the whole test on the same SQLite memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn add_user(db: &DatabaseConnection, username: &str, role: Role) -> user::Model {
    let request = UserCreateRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "password123".to_string(),
        role,
        department_code: Some("IT".to_string()),
        department_name: Some("Information Technology".to_string()),
        designation: Some("Staff".to_string()),
    };

    create_user(db, &request, &account_settings())
        .await
        .expect("create user")
}

pub struct Team {
    pub admin: user::Model,
    pub user: user::Model,
    pub supervisor: user::Model,
}

pub async fn add_team(db: &DatabaseConnection) -> Team {
    Team {
        admin: add_user(db, "admin", Role::Admin).await,
        user: add_user(db, "worker", Role::User).await,
        supervisor: add_user(db, "lead", Role::Supervisor).await,
    }
}

pub async fn add_job(db: &DatabaseConnection, team: &Team) -> job::Model {
    let request = JobCreateRequest {
        title_code: Some("Printer".to_string()),
        description: Some("Replace toner on the 3rd floor".to_string()),
        assigned_to: Some(team.user.id),
        supervisor: Some(team.supervisor.id),
        ..Default::default()
    };

    create_job(db, &request).await.expect("create job")
}

pub use sea_orm_migration::prelude::*;

mod m20261016_000001_create_user_table;
mod m20261016_000002_create_job_table;
mod m20261016_000003_create_report_table;
mod m20261016_000004_create_job_title_table;

pub use m20261016_000004_create_job_title_table::DEFAULT_TITLES;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_user_table::Migration),
            Box::new(m20261016_000002_create_job_table::Migration),
            Box::new(m20261016_000003_create_report_table::Migration),
            Box::new(m20261016_000004_create_job_title_table::Migration),
        ]
    }
}

use sea_orm::{ActiveModelTrait, Schema, Set};
use sea_orm_migration::prelude::*;
use crate::entity::job_title::{ActiveModel, Entity};

/// Titles offered in the job creation form before any admin adds more.
pub const DEFAULT_TITLES: [&str; 9] = [
    "Computer",
    "Printer",
    "Network",
    "Camera",
    "Mail",
    "Antivirus",
    "SAP",
    "MCS",
    "Other",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());
        manager
            .create_table(
                schema
                    .create_table_from_entity(Entity)
                    .if_not_exists()
                    .to_owned()
            )
            .await?;

        let db = manager.get_connection();
        for title in DEFAULT_TITLES {
            ActiveModel {
                code: Set(title.to_string()),
                name: Set(title.to_string()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entity).to_owned())
            .await
    }
}

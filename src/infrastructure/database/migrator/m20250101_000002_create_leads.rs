//! Create leads table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leads::Name).string().not_null())
                    .col(ColumnDef::new(Leads::Email).string().not_null())
                    .col(ColumnDef::new(Leads::Phone).string())
                    .col(ColumnDef::new(Leads::Company).string())
                    .col(
                        ColumnDef::new(Leads::Status)
                            .string_len(20)
                            .not_null()
                            .default("IN_PROGRESS"),
                    )
                    .col(
                        ColumnDef::new(Leads::Value)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Leads::Notes).string())
                    // No FK constraint: the manager-must-exist rule is
                    // enforced at write time by the lead service, and a
                    // deleted manager leaves the reference dangling.
                    .col(ColumnDef::new(Leads::ManagerId).string().not_null())
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Leads::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_manager_id")
                    .table(Leads::Table)
                    .col(Leads::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_status")
                    .table(Leads::Table)
                    .col(Leads::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Leads {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Company,
    Status,
    Value,
    Notes,
    ManagerId,
    CreatedAt,
    UpdatedAt,
}

//! Create companies table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string_len(15).not_null())
                    .col(ColumnDef::new(Companies::Description).text().null())
                    .col(
                        ColumnDef::new(Companies::AmountOfEmployees)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::Registered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Companies::CompanyType).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Stable ordering for list pagination
        manager
            .create_index(
                Index::create()
                    .name("idx_companies_created_at")
                    .table(Companies::Table)
                    .col(Companies::CreatedAt)
                    .col(Companies::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Companies {
    Table,
    Id,
    Name,
    Description,
    AmountOfEmployees,
    Registered,
    CompanyType,
    CreatedAt,
    UpdatedAt,
}

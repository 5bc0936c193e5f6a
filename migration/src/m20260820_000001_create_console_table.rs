use sea_orm_migration::prelude::*;

/// Creates the `console` table for gaming platforms.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Console {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
    Manufacturer,
    ReleaseYear,
    Discontinued,
    UnitsSold,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Console::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Console::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Console::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Console::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Console::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Console::Manufacturer).string().null())
                    .col(ColumnDef::new(Console::ReleaseYear).integer().null())
                    .col(ColumnDef::new(Console::Discontinued).integer().null())
                    .col(ColumnDef::new(Console::UnitsSold).string().null())
                    .to_owned(),
            )
            .await?;

        // Name is the key the create flow checks for duplicates; index the lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_console_name")
                    .table(Console::Table)
                    .col(Console::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Console::Table).to_owned())
            .await
    }
}

use sea_orm_migration::prelude::*;

/// Creates the `game` table. Each game references exactly one console;
/// the restrict action backs the application-level delete guard.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    ConsoleId,
    Title,
    Developer,
    Publisher,
    ReleaseDate,
    Cost,
}

#[derive(DeriveIden)]
enum Console {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Game::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Game::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Game::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Game::ConsoleId).uuid().not_null())
                    .col(ColumnDef::new(Game::Title).string().not_null())
                    .col(ColumnDef::new(Game::Developer).string().null())
                    .col(ColumnDef::new(Game::Publisher).string().null())
                    .col(ColumnDef::new(Game::ReleaseDate).date().null())
                    .col(ColumnDef::new(Game::Cost).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_console_id")
                            .from(Game::Table, Game::ConsoleId)
                            .to(Console::Table, Console::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Console detail and delete pages list a console's games
        manager
            .create_index(
                Index::create()
                    .name("idx_game_console_id")
                    .table(Game::Table)
                    .col(Game::ConsoleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}

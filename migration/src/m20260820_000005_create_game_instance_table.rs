use sea_orm_migration::prelude::*;

/// Creates the `game_instance` table for physical, sellable copies of a game.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GameInstance {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    GameId,
    Status,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameInstance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameInstance::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameInstance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameInstance::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameInstance::GameId).uuid().not_null())
                    .col(
                        ColumnDef::new(GameInstance::Status)
                            .string_len(20)
                            .not_null()
                            .default("Available"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_instance_game_id")
                            .from(GameInstance::Table, GameInstance::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Game detail and delete pages list a game's copies
        manager
            .create_index(
                Index::create()
                    .name("idx_game_instance_game_id")
                    .table(GameInstance::Table)
                    .col(GameInstance::GameId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameInstance::Table).to_owned())
            .await
    }
}

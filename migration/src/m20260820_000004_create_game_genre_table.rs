use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameGenre::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameGenre::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameGenre::GenreId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(GameGenre::GameId)
                            .col(GameGenre::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_genre_game_id")
                            .from(GameGenre::Table, GameGenre::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_genre_genre_id")
                            .from(GameGenre::Table, GameGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Add index on genre_id for reverse lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_game_genre_genre_id")
                    .table(GameGenre::Table)
                    .col(GameGenre::GenreId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameGenre::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameGenre {
    Table,
    GameId,
    GenreId,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
}

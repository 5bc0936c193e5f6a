pub use sea_orm_migration::prelude::*;

mod m20260820_000001_create_console_table;
mod m20260820_000002_create_genre_table;
mod m20260820_000003_create_game_table;
mod m20260820_000004_create_game_genre_table;
mod m20260820_000005_create_game_instance_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260820_000001_create_console_table::Migration),
            Box::new(m20260820_000002_create_genre_table::Migration),
            Box::new(m20260820_000003_create_game_table::Migration),
            Box::new(m20260820_000004_create_game_genre_table::Migration),
            Box::new(m20260820_000005_create_game_instance_table::Migration),
        ]
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub console_id: Uuid,
    pub title: String,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub release_date: Option<Date>,
    pub cost: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::console::Entity",
        from = "Column::ConsoleId",
        to = "super::console::Column::Id"
    )]
    Console,
    #[sea_orm(has_many = "super::game_instance::Entity")]
    GameInstances,
    #[sea_orm(has_many = "super::game_genre::Entity")]
    GameGenres,
}

impl Related<super::console::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Console.def()
    }
}

impl Related<super::game_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameInstances.def()
    }
}

impl Related<super::game_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameGenres.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_genre::Relation::Game.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical detail-page URL for this game.
    #[must_use]
    pub fn detail_url(&self) -> String {
        format!("/catalog/game/{}", self.id)
    }

    /// Release date formatted for display, e.g. `Mar 3, 2017`.
    #[must_use]
    pub fn release_date_formatted(&self) -> Option<String> {
        self.release_date
            .map(|date| date.format("%b %-d, %Y").to_string())
    }
}

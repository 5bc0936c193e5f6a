use axum::extract::State;
use axum::response::Html;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::error;

use crate::entities::{InstanceStatus, console, game, game_instance, genre};
use crate::state::AppState;
use crate::views::{self, IndexCounts};

/// `GET /catalog` — dashboard with record counts for every entity type.
///
/// The five counts run concurrently and fail independently: a failed count is
/// logged and rendered as unavailable while the rest still display.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let db = &state.db;
    let (games, game_instances, available, consoles, genres) = tokio::join!(
        game::Entity::find().count(db),
        game_instance::Entity::find().count(db),
        game_instance::Entity::find()
            .filter(game_instance::Column::Status.eq(InstanceStatus::Available.as_str()))
            .count(db),
        console::Entity::find().count(db),
        genre::Entity::find().count(db),
    );

    let counts = IndexCounts {
        games: count_or_log("game", games),
        game_instances: count_or_log("game instance", game_instances),
        game_instances_available: count_or_log("available game instance", available),
        consoles: count_or_log("console", consoles),
        genres: count_or_log("genre", genres),
    };

    Html(views::index(&counts))
}

/// Unwrap one dashboard count, logging and absorbing a failure.
fn count_or_log(label: &str, result: Result<u64, DbErr>) -> Option<u64> {
    match result {
        Ok(count) => Some(count),
        Err(err) => {
            error!("dashboard {label} count failed: {err}");
            None
        }
    }
}

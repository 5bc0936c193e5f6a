mod catalog;
mod console;
mod game;
mod game_instance;
mod genre;
mod health;

use axum::Router;
use axum::response::Redirect;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /` — redirect to the catalog dashboard
/// - `GET /health` — health check with database connectivity
/// - `/catalog` — dashboard, entity lists, and the CRUD form flows
pub fn router() -> Router<AppState> {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        .merge(console::router())
        .merge(game::router())
        .merge(genre::router())
        .merge(game_instance::router());

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .merge(health::router())
        .nest("/catalog", catalog)
}

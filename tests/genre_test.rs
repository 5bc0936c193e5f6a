mod common;

use axum::Router;
use axum::http::StatusCode;
use migration::{Migrator, MigratorTrait};

use game_catalog::config::{Config, Environment};
use game_catalog::state::AppState;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// Build the app router backed by an in-memory `SQLite` database.
async fn test_app() -> Router {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();

    let state = AppState {
        db,
        config: Config {
            database_url: String::new(),
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
        },
    };

    game_catalog::routes::router().with_state(state)
}

/// Minimal form encoding for the fixtures used here: spaces become `+`.
fn enc(value: &str) -> String {
    value.replace(' ', "+")
}

async fn create_console(app: &Router, name: &str) -> String {
    let (status, location, body) = common::post_form(
        app,
        "/catalog/console/create",
        &format!("name={}", enc(name)),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER, "console create failed: {body}");
    let location = location.unwrap_or_default();
    location.rsplit('/').next().unwrap_or_default().to_string()
}

async fn create_genre(app: &Router, name: &str) -> String {
    let (status, location, body) =
        common::post_form(app, "/catalog/genre/create", &format!("name={}", enc(name))).await;
    assert_eq!(status, StatusCode::SEE_OTHER, "genre create failed: {body}");
    let location = location.unwrap_or_default();
    location.rsplit('/').next().unwrap_or_default().to_string()
}

async fn create_game(app: &Router, title: &str, console_id: &str, genre_id: &str) -> String {
    let form = format!("title={}&console={console_id}&genre={genre_id}", enc(title));
    let (status, location, body) = common::post_form(app, "/catalog/game/create", &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER, "game create failed: {body}");
    let location = location.unwrap_or_default();
    location.rsplit('/').next().unwrap_or_default().to_string()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn create_genre_persists_and_redirects_to_detail() {
    let app = test_app().await;

    let (status, location, body) =
        common::post_form(&app, "/catalog/genre/create", "name=Role-playing").await;

    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    let location = location.unwrap_or_default();
    assert!(location.starts_with("/catalog/genre/"));

    let (status, body) = common::get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Genre: Role-playing"));
}

#[tokio::test]
async fn create_genre_missing_name_rerenders_with_error() {
    let app = test_app().await;

    let (status, location, body) =
        common::post_form(&app, "/catalog/genre/create", "name=++").await;

    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Genre name must be specified"));

    let (_, list) = common::get(&app, "/catalog/genres").await;
    assert!(list.contains("There are no genres."));
}

#[tokio::test]
async fn duplicate_genre_names_both_persist() {
    // Unlike consoles, genre names carry no uniqueness rule.
    let app = test_app().await;
    let first = create_genre(&app, "Shooter").await;
    let second = create_genre(&app, "Shooter").await;

    assert_ne!(first, second);

    let (_, list) = common::get(&app, "/catalog/genres").await;
    assert_eq!(list.matches("Shooter").count(), 2);
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn genre_detail_lists_games_in_the_genre() {
    let app = test_app().await;
    let console_id = create_console(&app, "PC Engine").await;
    let genre_id = create_genre(&app, "Shooter").await;
    create_game(&app, "Blazing Lazers", &console_id, &genre_id).await;

    let (status, body) = common::get(&app, &format!("/catalog/genre/{genre_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Genre: Shooter"));
    assert!(body.contains("Blazing Lazers"));
}

#[tokio::test]
async fn genre_detail_unknown_id_is_404() {
    let app = test_app().await;

    let (status, _) =
        common::get(&app, "/catalog/genre/00000000-0000-0000-0000-000000000000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn update_genre_replaces_the_record() {
    let app = test_app().await;
    let id = create_genre(&app, "Platform").await;

    let (status, body) = common::get(&app, &format!("/catalog/genre/{id}/update")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Platform\""));

    let (status, location, body) = common::post_form(
        &app,
        &format!("/catalog/genre/{id}/update"),
        "name=Platformer",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    assert_eq!(location.unwrap_or_default(), format!("/catalog/genre/{id}"));

    let (_, body) = common::get(&app, &format!("/catalog/genre/{id}")).await;
    assert!(body.contains("Genre: Platformer"));
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_genre_with_games_refuses_and_lists_them() {
    let app = test_app().await;
    let console_id = create_console(&app, "PC Engine").await;
    let genre_id = create_genre(&app, "Shooter").await;
    create_game(&app, "Blazing Lazers", &console_id, &genre_id).await;

    let (status, location, body) =
        common::post_form(&app, &format!("/catalog/genre/{genre_id}/delete"), "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Delete these games"));
    assert!(body.contains("Blazing Lazers"));

    let (status, _) = common::get(&app, &format!("/catalog/genre/{genre_id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_genre_without_games_removes_it() {
    let app = test_app().await;
    let id = create_genre(&app, "Sports").await;

    let (status, location, _) =
        common::post_form(&app, &format!("/catalog/genre/{id}/delete"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.unwrap_or_default(), "/catalog/genres");

    let (status, _) = common::get(&app, &format!("/catalog/genre/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

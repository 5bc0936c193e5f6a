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

/// Seed one console, genre, and game; returns the game id.
async fn seed_game(app: &Router, title: &str) -> String {
    let (_, location, _) =
        common::post_form(app, "/catalog/console/create", "name=Test+Console").await;
    let console_id = location
        .unwrap_or_default()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let (_, location, _) =
        common::post_form(app, "/catalog/genre/create", "name=Test+Genre").await;
    let genre_id = location
        .unwrap_or_default()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let form = format!("title={}&console={console_id}&genre={genre_id}", enc(title));
    let (status, location, body) = common::post_form(app, "/catalog/game/create", &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER, "game create failed: {body}");
    location
        .unwrap_or_default()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Create an instance via the form flow and return its detail URL.
async fn create_instance(app: &Router, game_id: &str, status_field: &str) -> String {
    let form = if status_field.is_empty() {
        format!("game={game_id}")
    } else {
        format!("game={game_id}&status={}", enc(status_field))
    };
    let (status, location, body) =
        common::post_form(app, "/catalog/gameinstance/create", &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER, "instance create failed: {body}");
    location.unwrap_or_default()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn instance_status_defaults_to_available() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;

    let detail = create_instance(&app, &game_id, "").await;
    assert!(detail.starts_with("/catalog/gameinstance/"));

    let (status, body) = common::get(&app, &detail).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Available"));
    assert!(body.contains("Chrono Trigger"));
}

#[tokio::test]
async fn instance_accepts_sold_out_status() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;

    let detail = create_instance(&app, &game_id, "Sold Out").await;

    let (_, body) = common::get(&app, &detail).await;
    assert!(body.contains("Sold Out"));
}

#[tokio::test]
async fn instance_rejects_unknown_status() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;

    let (status, location, body) = common::post_form(
        &app,
        "/catalog/gameinstance/create",
        &format!("game={game_id}&status=Broken"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Invalid status"));

    let (_, list) = common::get(&app, "/catalog/gameinstances").await;
    assert!(list.contains("There are no game instances."));
}

#[tokio::test]
async fn instance_rejects_lowercase_status_spelling() {
    // The enumeration is exact-match; "available" is not a known status.
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;

    let (status, _, body) = common::post_form(
        &app,
        "/catalog/gameinstance/create",
        &format!("game={game_id}&status=available"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid status"));
}

#[tokio::test]
async fn instance_requires_a_game_reference() {
    let app = test_app().await;

    let (status, _, body) =
        common::post_form(&app, "/catalog/gameinstance/create", "status=Available").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Game must be specified"));
}

// ============================================================================
// List / Detail
// ============================================================================

#[tokio::test]
async fn instance_list_shows_game_titles_and_statuses() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;
    create_instance(&app, &game_id, "").await;
    create_instance(&app, &game_id, "Sold Out").await;

    let (status, body) = common::get(&app, "/catalog/gameinstances").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("Chrono Trigger").count(), 2);
    assert!(body.contains("(Available)"));
    assert!(body.contains("(Sold Out)"));
}

#[tokio::test]
async fn instance_detail_unknown_id_is_404() {
    let app = test_app().await;

    let (status, _) = common::get(
        &app,
        "/catalog/gameinstance/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn update_instance_changes_status() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;
    let detail = create_instance(&app, &game_id, "").await;

    let (status, body) = common::get(&app, &format!("{detail}/update")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Available\" selected"));

    let (status, location, body) = common::post_form(
        &app,
        &format!("{detail}/update"),
        &format!("game={game_id}&status=Sold+Out"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    assert_eq!(location.unwrap_or_default(), detail);

    let (_, body) = common::get(&app, &detail).await;
    assert!(body.contains("Sold Out"));
}

#[tokio::test]
async fn update_unknown_instance_is_404() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;

    let (status, _, _) = common::post_form(
        &app,
        "/catalog/gameinstance/00000000-0000-0000-0000-000000000000/update",
        &format!("game={game_id}&status=Available"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_instance_removes_it() {
    let app = test_app().await;
    let game_id = seed_game(&app, "Chrono Trigger").await;
    let detail = create_instance(&app, &game_id, "").await;

    let (status, body) = common::get(&app, &format!("{detail}/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Do you really want to delete copy"));

    let (status, location, _) = common::post_form(&app, &format!("{detail}/delete"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.unwrap_or_default(), "/catalog/gameinstances");

    let (status, _) = common::get(&app, &detail).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

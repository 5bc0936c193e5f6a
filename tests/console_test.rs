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

/// Create a console via the form flow and return its id.
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

/// Create a genre via the form flow and return its id.
async fn create_genre(app: &Router, name: &str) -> String {
    let (status, location, body) =
        common::post_form(app, "/catalog/genre/create", &format!("name={}", enc(name))).await;
    assert_eq!(status, StatusCode::SEE_OTHER, "genre create failed: {body}");
    let location = location.unwrap_or_default();
    location.rsplit('/').next().unwrap_or_default().to_string()
}

/// Create a game in one genre via the form flow and return its id.
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
async fn create_console_persists_and_redirects_to_detail() {
    let app = test_app().await;

    let (status, location, body) = common::post_form(
        &app,
        "/catalog/console/create",
        "name=Dreamcast&manufacturer=Sega&release_year=1998&discontinued=2001&units_sold=9.13+million",
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    let location = location.unwrap_or_default();
    assert!(
        location.starts_with("/catalog/console/"),
        "unexpected redirect target: {location}"
    );

    let (status, body) = common::get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Console: Dreamcast"));
    assert!(body.contains("Sega"));
    assert!(body.contains("1998"));
    assert!(body.contains("9.13 million"));
}

#[tokio::test]
async fn create_console_missing_name_rerenders_with_error() {
    let app = test_app().await;

    let (status, location, body) =
        common::post_form(&app, "/catalog/console/create", "name=&manufacturer=Sony").await;

    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Console name must be specified"));
    // The submitted input is echoed back.
    assert!(body.contains("value=\"Sony\""));

    // Nothing was persisted.
    let (_, list) = common::get(&app, "/catalog/consoles").await;
    assert!(list.contains("There are no consoles."));
}

#[tokio::test]
async fn create_console_rejects_two_digit_year() {
    let app = test_app().await;

    let (status, _, body) = common::post_form(
        &app,
        "/catalog/console/create",
        "name=Dreamcast&release_year=98",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Release year must be a 4-digit number"));
    assert!(body.contains("value=\"98\""));
}

#[tokio::test]
async fn duplicate_console_name_redirects_to_existing_record() {
    let app = test_app().await;
    let id = create_console(&app, "Saturn").await;

    let (status, location, _) =
        common::post_form(&app, "/catalog/console/create", "name=Saturn").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.unwrap_or_default(), format!("/catalog/console/{id}"));

    // Still a single record.
    let (_, list) = common::get(&app, "/catalog/consoles").await;
    assert_eq!(list.matches("Saturn").count(), 1);
}

// ============================================================================
// List / Detail
// ============================================================================

#[tokio::test]
async fn console_list_is_sorted_by_name() {
    let app = test_app().await;
    create_console(&app, "Wii").await;
    create_console(&app, "Dreamcast").await;

    let (status, body) = common::get(&app, "/catalog/consoles").await;
    assert_eq!(status, StatusCode::OK);

    let dreamcast = body.find("Dreamcast").unwrap_or_default();
    let wii = body.find("Wii").unwrap_or_default();
    assert!(dreamcast < wii, "expected Dreamcast listed before Wii");
}

#[tokio::test]
async fn console_detail_unknown_id_is_404() {
    let app = test_app().await;

    let (status, _) = common::get(
        &app,
        "/catalog/console/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn console_detail_lists_its_games() {
    let app = test_app().await;
    let console_id = create_console(&app, "GameCube").await;
    let genre_id = create_genre(&app, "Racing").await;
    create_game(&app, "F-Zero GX", &console_id, &genre_id).await;

    let (status, body) = common::get(&app, &format!("/catalog/console/{console_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("F-Zero GX"));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn update_console_replaces_the_record() {
    let app = test_app().await;
    let id = create_console(&app, "Mega Drive").await;

    let (status, body) = common::get(&app, &format!("/catalog/console/{id}/update")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Mega Drive\""));

    let (status, location, body) = common::post_form(
        &app,
        &format!("/catalog/console/{id}/update"),
        "name=Genesis&manufacturer=Sega",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER, "{body}");
    assert_eq!(location.unwrap_or_default(), format!("/catalog/console/{id}"));

    let (_, body) = common::get(&app, &format!("/catalog/console/{id}")).await;
    assert!(body.contains("Console: Genesis"));
    assert!(!body.contains("Mega Drive"));
}

#[tokio::test]
async fn update_unknown_console_is_404() {
    let app = test_app().await;

    let (status, _, _) = common::post_form(
        &app,
        "/catalog/console/00000000-0000-0000-0000-000000000000/update",
        "name=Ghost",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_console_with_games_refuses_and_lists_them() {
    let app = test_app().await;
    let console_id = create_console(&app, "GameCube").await;
    let genre_id = create_genre(&app, "Racing").await;
    create_game(&app, "F-Zero GX", &console_id, &genre_id).await;

    // Confirmation page lists the dependent.
    let (status, body) =
        common::get(&app, &format!("/catalog/console/{console_id}/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("F-Zero GX"));

    // POST refuses and re-renders the same confirmation.
    let (status, location, body) =
        common::post_form(&app, &format!("/catalog/console/{console_id}/delete"), "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Delete these games"));
    assert!(body.contains("F-Zero GX"));

    // Repeating the request yields the same outcome.
    let (status, _, body) =
        common::post_form(&app, &format!("/catalog/console/{console_id}/delete"), "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("F-Zero GX"));

    // The record survived.
    let (status, _) = common::get(&app, &format!("/catalog/console/{console_id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_console_without_dependents_removes_it() {
    let app = test_app().await;
    let id = create_console(&app, "Virtual Boy").await;

    let (status, body) = common::get(&app, &format!("/catalog/console/{id}/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Do you really want to delete this console?"));

    let (status, location, _) =
        common::post_form(&app, &format!("/catalog/console/{id}/delete"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.unwrap_or_default(), "/catalog/consoles");

    let (status, _) = common::get(&app, &format!("/catalog/console/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_vanished_console_redirects_to_list() {
    let app = test_app().await;

    let (status, location, _) = common::post_form(
        &app,
        "/catalog/console/00000000-0000-0000-0000-000000000000/delete",
        "",
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.unwrap_or_default(), "/catalog/consoles");
}

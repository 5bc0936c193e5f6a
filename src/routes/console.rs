use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entities::{console, game},
    error::AppError,
    forms::{ConsoleForm, FormData, non_empty},
    state::AppState,
    views,
};

/// Console CRUD router; literal segments registered before the id pattern.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/console/create", get(create_form).post(create))
        .route("/console/{id}/delete", get(delete_form).post(delete))
        .route("/console/{id}/update", get(update_form).post(update))
        .route("/console/{id}", get(detail))
        .route("/consoles", get(list))
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /catalog/consoles` — all consoles, sorted by name.
async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let consoles = console::Entity::find()
        .order_by_asc(console::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Html(views::console::list(&consoles)))
}

/// `GET /catalog/console/{id}` — console detail with the games on it.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let (console, games) = console_with_games(&state.db, id).await?;
    let console = console.ok_or_else(|| AppError::not_found("Console not found"))?;
    Ok(Html(views::console::detail(&console, &games)))
}

/// `GET /catalog/console/create` — blank create form.
async fn create_form() -> Html<String> {
    Html(views::console::form(
        "Create Console",
        &ConsoleForm::default(),
        &[],
    ))
}

/// `POST /catalog/console/create` — validate and persist a new console.
async fn create(State(state): State<AppState>, data: FormData) -> Result<Response, AppError> {
    let form = ConsoleForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        return Ok(Html(views::console::form("Create Console", &form, &errors)).into_response());
    }

    // Console name is the unique key: a match redirects to the existing
    // record instead of creating a duplicate.
    let existing = console::Entity::find()
        .filter(console::Column::Name.eq(form.name.as_str()))
        .one(&state.db)
        .await?;
    if let Some(existing) = existing {
        return Ok(Redirect::to(&existing.detail_url()).into_response());
    }

    let now = chrono::Utc::now();
    let console = console::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        created_at: ActiveValue::Set(now.into()),
        updated_at: ActiveValue::Set(now.into()),
        name: ActiveValue::Set(form.name.clone()),
        manufacturer: ActiveValue::Set(non_empty(&form.manufacturer)),
        release_year: ActiveValue::Set(form.release_year_value()),
        discontinued: ActiveValue::Set(form.discontinued_value()),
        units_sold: ActiveValue::Set(non_empty(&form.units_sold)),
    }
    .insert(&state.db)
    .await?;

    Ok(Redirect::to(&console.detail_url()).into_response())
}

/// `GET /catalog/console/{id}/update` — pre-filled edit form.
async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let console = find_console(&state.db, id).await?;
    let form = ConsoleForm::from_model(&console);
    Ok(Html(views::console::form("Update Console", &form, &[])))
}

/// `POST /catalog/console/{id}/update` — full-record replace keyed by id.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    data: FormData,
) -> Result<Response, AppError> {
    let form = ConsoleForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        return Ok(Html(views::console::form("Update Console", &form, &errors)).into_response());
    }

    let model = console::ActiveModel {
        id: ActiveValue::Unchanged(id),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        name: ActiveValue::Set(form.name.clone()),
        manufacturer: ActiveValue::Set(non_empty(&form.manufacturer)),
        release_year: ActiveValue::Set(form.release_year_value()),
        discontinued: ActiveValue::Set(form.discontinued_value()),
        units_sold: ActiveValue::Set(non_empty(&form.units_sold)),
    };
    let console = match model.update(&state.db).await {
        Ok(console) => console,
        Err(DbErr::RecordNotUpdated) => {
            return Err(AppError::not_found("Console not found"));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Redirect::to(&console.detail_url()).into_response())
}

/// `GET /catalog/console/{id}/delete` — confirmation page listing dependents.
async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (console, games) = console_with_games(&state.db, id).await?;
    let Some(console) = console else {
        // Already gone: deleting is an idempotent no-op.
        return Ok(Redirect::to("/catalog/consoles").into_response());
    };
    Ok(Html(views::console::confirm_delete(&console, &games)).into_response())
}

/// `POST /catalog/console/{id}/delete` — delete when no games depend on it.
///
/// The dependent re-check and the delete run in one transaction, so the
/// record cannot vanish between them; a dependent created after commit is
/// still possible.
async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, AppError> {
    let txn = state.db.begin().await?;

    let console = console::Entity::find_by_id(id).one(&txn).await?;
    let Some(console) = console else {
        txn.commit().await?;
        return Ok(Redirect::to("/catalog/consoles").into_response());
    };

    let games = game::Entity::find()
        .filter(game::Column::ConsoleId.eq(id))
        .order_by_asc(game::Column::Title)
        .all(&txn)
        .await?;
    if games.is_empty() {
        console::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        return Ok(Redirect::to("/catalog/consoles").into_response());
    }

    txn.commit().await?;
    Ok(Html(views::console::confirm_delete(&console, &games)).into_response())
}

// ============================================================================
// Helpers
// ============================================================================

async fn find_console(db: &DatabaseConnection, id: Uuid) -> Result<console::Model, AppError> {
    console::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Console not found"))
}

/// Target console and its dependent games, loaded concurrently.
async fn console_with_games(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<(Option<console::Model>, Vec<game::Model>), AppError> {
    let (console, games) = tokio::try_join!(
        console::Entity::find_by_id(id).one(db),
        game::Entity::find()
            .filter(game::Column::ConsoleId.eq(id))
            .order_by_asc(game::Column::Title)
            .all(db),
    )?;
    Ok((console, games))
}

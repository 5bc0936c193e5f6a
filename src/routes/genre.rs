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
    entities::{game, game_genre, genre},
    error::AppError,
    forms::{FormData, GenreForm},
    state::AppState,
    views,
};

/// Genre CRUD router; literal segments registered before the id pattern.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genre/create", get(create_form).post(create))
        .route("/genre/{id}/delete", get(delete_form).post(delete))
        .route("/genre/{id}/update", get(update_form).post(update))
        .route("/genre/{id}", get(detail))
        .route("/genres", get(list))
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /catalog/genres` — all genres, sorted by name.
async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let genres = genre::Entity::find()
        .order_by_asc(genre::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Html(views::genre::list(&genres)))
}

/// `GET /catalog/genre/{id}` — genre detail with the games in it.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let (genre, games) = tokio::try_join!(
        genre::Entity::find_by_id(id).one(&state.db),
        games_in_genre(&state.db, id),
    )?;
    let genre = genre.ok_or_else(|| AppError::not_found("Genre not found"))?;
    Ok(Html(views::genre::detail(&genre, &games)))
}

/// `GET /catalog/genre/create` — blank create form.
async fn create_form() -> Html<String> {
    Html(views::genre::form(
        "Create Genre",
        &GenreForm::default(),
        &[],
    ))
}

/// `POST /catalog/genre/create` — validate and persist a new genre.
async fn create(State(state): State<AppState>, data: FormData) -> Result<Response, AppError> {
    let form = GenreForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        return Ok(Html(views::genre::form("Create Genre", &form, &errors)).into_response());
    }

    let now = chrono::Utc::now();
    let genre = genre::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        created_at: ActiveValue::Set(now.into()),
        updated_at: ActiveValue::Set(now.into()),
        name: ActiveValue::Set(form.name.clone()),
    }
    .insert(&state.db)
    .await?;

    Ok(Redirect::to(&genre.detail_url()).into_response())
}

/// `GET /catalog/genre/{id}/update` — pre-filled edit form.
async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let genre = genre::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Genre not found"))?;
    let form = GenreForm::from_model(&genre);
    Ok(Html(views::genre::form("Update Genre", &form, &[])))
}

/// `POST /catalog/genre/{id}/update` — full-record replace keyed by id.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    data: FormData,
) -> Result<Response, AppError> {
    let form = GenreForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        return Ok(Html(views::genre::form("Update Genre", &form, &errors)).into_response());
    }

    let model = genre::ActiveModel {
        id: ActiveValue::Unchanged(id),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        name: ActiveValue::Set(form.name.clone()),
    };
    let genre = match model.update(&state.db).await {
        Ok(genre) => genre,
        Err(DbErr::RecordNotUpdated) => {
            return Err(AppError::not_found("Genre not found"));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Redirect::to(&genre.detail_url()).into_response())
}

/// `GET /catalog/genre/{id}/delete` — confirmation page listing dependents.
async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (genre, games) = tokio::try_join!(
        genre::Entity::find_by_id(id).one(&state.db),
        games_in_genre(&state.db, id),
    )?;
    let Some(genre) = genre else {
        // Already gone: deleting is an idempotent no-op.
        return Ok(Redirect::to("/catalog/genres").into_response());
    };
    Ok(Html(views::genre::confirm_delete(&genre, &games)).into_response())
}

/// `POST /catalog/genre/{id}/delete` — delete when no games are linked to it.
///
/// The dependent re-check and the delete run in one transaction; a link
/// created after commit is still possible.
async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, AppError> {
    let txn = state.db.begin().await?;

    let genre = genre::Entity::find_by_id(id).one(&txn).await?;
    let Some(genre) = genre else {
        txn.commit().await?;
        return Ok(Redirect::to("/catalog/genres").into_response());
    };

    let links = game_genre::Entity::find()
        .filter(game_genre::Column::GenreId.eq(id))
        .all(&txn)
        .await?;
    if links.is_empty() {
        genre::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        return Ok(Redirect::to("/catalog/genres").into_response());
    }

    let game_ids: Vec<Uuid> = links.iter().map(|link| link.game_id).collect();
    let games = game::Entity::find()
        .filter(game::Column::Id.is_in(game_ids))
        .order_by_asc(game::Column::Title)
        .all(&txn)
        .await?;
    txn.commit().await?;
    Ok(Html(views::genre::confirm_delete(&genre, &games)).into_response())
}

// ============================================================================
// Helpers
// ============================================================================

/// Two-step junction load: link rows first, then the games they point at.
async fn games_in_genre(db: &DatabaseConnection, genre_id: Uuid) -> Result<Vec<game::Model>, DbErr> {
    let links = game_genre::Entity::find()
        .filter(game_genre::Column::GenreId.eq(genre_id))
        .all(db)
        .await?;
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let game_ids: Vec<Uuid> = links.iter().map(|link| link.game_id).collect();
    game::Entity::find()
        .filter(game::Column::Id.is_in(game_ids))
        .order_by_asc(game::Column::Title)
        .all(db)
        .await
}

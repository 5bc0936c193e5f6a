use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entities::{console, game, game_genre, game_instance, genre},
    error::AppError,
    forms::{FormData, GameForm, non_empty},
    state::AppState,
    views,
};

/// Game CRUD router; literal segments registered before the id pattern.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game/create", get(create_form).post(create))
        .route("/game/{id}/delete", get(delete_form).post(delete))
        .route("/game/{id}/update", get(update_form).post(update))
        .route("/game/{id}", get(detail))
        .route("/games", get(list))
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /catalog/games` — all games with their consoles, sorted by title.
async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let games = game::Entity::find()
        .find_also_related(console::Entity)
        .order_by_asc(game::Column::Title)
        .all(&state.db)
        .await?;
    Ok(Html(views::game::list(&games)))
}

/// `GET /catalog/game/{id}` — game detail with console, genres, and copies.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let (game, genres, instances) = tokio::try_join!(
        game::Entity::find_by_id(id)
            .find_also_related(console::Entity)
            .one(&state.db),
        genres_of_game(&state.db, id),
        game_instance::Entity::find()
            .filter(game_instance::Column::GameId.eq(id))
            .order_by_asc(game_instance::Column::Status)
            .all(&state.db),
    )?;

    let Some((game, console)) = game else {
        return Err(AppError::not_found("Game not found"));
    };
    Ok(Html(views::game::detail(
        &game,
        console.as_ref(),
        &genres,
        &instances,
    )))
}

/// `GET /catalog/game/create` — blank form with console and genre pickers.
async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (consoles, genres) = reference_lists(&state.db).await?;
    Ok(Html(views::game::form(
        "Create Game",
        &GameForm::default(),
        &consoles,
        &genres,
        &[],
    )))
}

/// `POST /catalog/game/create` — validate and persist a new game with its
/// genre links.
async fn create(State(state): State<AppState>, data: FormData) -> Result<Response, AppError> {
    let form = GameForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        let (consoles, genres) = reference_lists(&state.db).await?;
        return Ok(
            Html(views::game::form("Create Game", &form, &consoles, &genres, &errors))
                .into_response(),
        );
    }
    let console_id = form
        .console_id()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("console id failed to re-parse")))?;

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;
    let game = game::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        created_at: ActiveValue::Set(now.into()),
        updated_at: ActiveValue::Set(now.into()),
        console_id: ActiveValue::Set(console_id),
        title: ActiveValue::Set(form.title.clone()),
        developer: ActiveValue::Set(non_empty(&form.developer)),
        publisher: ActiveValue::Set(non_empty(&form.publisher)),
        release_date: ActiveValue::Set(form.release_date_value()),
        cost: ActiveValue::Set(non_empty(&form.cost)),
    }
    .insert(&txn)
    .await?;
    replace_genres(&txn, game.id, &form.genre_ids()).await?;
    txn.commit().await?;

    Ok(Redirect::to(&game.detail_url()).into_response())
}

/// `GET /catalog/game/{id}/update` — edit form with current genres checked.
async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let (game, links, (consoles, genres)) = tokio::try_join!(
        game::Entity::find_by_id(id).one(&state.db),
        game_genre::Entity::find()
            .filter(game_genre::Column::GameId.eq(id))
            .all(&state.db),
        reference_lists(&state.db),
    )?;

    let game = game.ok_or_else(|| AppError::not_found("Game not found"))?;
    let current: Vec<Uuid> = links.iter().map(|link| link.genre_id).collect();
    let form = GameForm::from_model(&game, &current);
    Ok(Html(views::game::form(
        "Update Game",
        &form,
        &consoles,
        &genres,
        &[],
    )))
}

/// `POST /catalog/game/{id}/update` — full-record replace keyed by id; the
/// genre links are replaced as a set.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    data: FormData,
) -> Result<Response, AppError> {
    let form = GameForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        let (consoles, genres) = reference_lists(&state.db).await?;
        return Ok(
            Html(views::game::form("Update Game", &form, &consoles, &genres, &errors))
                .into_response(),
        );
    }
    let console_id = form
        .console_id()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("console id failed to re-parse")))?;

    let txn = state.db.begin().await?;
    let model = game::ActiveModel {
        id: ActiveValue::Unchanged(id),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        console_id: ActiveValue::Set(console_id),
        title: ActiveValue::Set(form.title.clone()),
        developer: ActiveValue::Set(non_empty(&form.developer)),
        publisher: ActiveValue::Set(non_empty(&form.publisher)),
        release_date: ActiveValue::Set(form.release_date_value()),
        cost: ActiveValue::Set(non_empty(&form.cost)),
    };
    let game = match model.update(&txn).await {
        Ok(game) => game,
        Err(DbErr::RecordNotUpdated) => {
            return Err(AppError::not_found("Game not found"));
        }
        Err(err) => return Err(err.into()),
    };
    replace_genres(&txn, id, &form.genre_ids()).await?;
    txn.commit().await?;

    Ok(Redirect::to(&game.detail_url()).into_response())
}

/// `GET /catalog/game/{id}/delete` — confirmation page listing dependents.
async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (game, instances) = game_with_instances(&state.db, id).await?;
    let Some(game) = game else {
        // Already gone: deleting is an idempotent no-op.
        return Ok(Redirect::to("/catalog/games").into_response());
    };
    Ok(Html(views::game::confirm_delete(&game, &instances)).into_response())
}

/// `POST /catalog/game/{id}/delete` — delete when no copies depend on it.
///
/// The dependent re-check, the genre-link cleanup, and the delete run in one
/// transaction; a dependent created after commit is still possible.
async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, AppError> {
    let txn = state.db.begin().await?;

    let game = game::Entity::find_by_id(id).one(&txn).await?;
    let Some(game) = game else {
        txn.commit().await?;
        return Ok(Redirect::to("/catalog/games").into_response());
    };

    let instances = game_instance::Entity::find()
        .filter(game_instance::Column::GameId.eq(id))
        .order_by_asc(game_instance::Column::Status)
        .all(&txn)
        .await?;
    if instances.is_empty() {
        game_genre::Entity::delete_many()
            .filter(game_genre::Column::GameId.eq(id))
            .exec(&txn)
            .await?;
        game::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        return Ok(Redirect::to("/catalog/games").into_response());
    }

    txn.commit().await?;
    Ok(Html(views::game::confirm_delete(&game, &instances)).into_response())
}

// ============================================================================
// Helpers
// ============================================================================

/// Two-step junction load: link rows first, then the referenced genres.
async fn genres_of_game(
    db: &DatabaseConnection,
    game_id: Uuid,
) -> Result<Vec<genre::Model>, DbErr> {
    let links = game_genre::Entity::find()
        .filter(game_genre::Column::GameId.eq(game_id))
        .all(db)
        .await?;
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let genre_ids: Vec<Uuid> = links.iter().map(|link| link.genre_id).collect();
    genre::Entity::find()
        .filter(genre::Column::Id.is_in(genre_ids))
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await
}

/// Console and genre pickers for the game form, loaded concurrently.
async fn reference_lists(
    db: &DatabaseConnection,
) -> Result<(Vec<console::Model>, Vec<genre::Model>), DbErr> {
    tokio::try_join!(
        console::Entity::find()
            .order_by_asc(console::Column::Name)
            .all(db),
        genre::Entity::find()
            .order_by_asc(genre::Column::Name)
            .all(db),
    )
}

/// Target game and its dependent copies, loaded concurrently.
async fn game_with_instances(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<(Option<game::Model>, Vec<game_instance::Model>), AppError> {
    let (game, instances) = tokio::try_join!(
        game::Entity::find_by_id(id).one(db),
        game_instance::Entity::find()
            .filter(game_instance::Column::GameId.eq(id))
            .order_by_asc(game_instance::Column::Status)
            .all(db),
    )?;
    Ok((game, instances))
}

/// Replace the game's genre links: delete the existing set, insert the new.
async fn replace_genres(
    txn: &DatabaseTransaction,
    game_id: Uuid,
    genre_ids: &[Uuid],
) -> Result<(), AppError> {
    game_genre::Entity::delete_many()
        .filter(game_genre::Column::GameId.eq(game_id))
        .exec(txn)
        .await?;

    for genre_id in genre_ids {
        game_genre::ActiveModel {
            game_id: ActiveValue::Set(game_id),
            genre_id: ActiveValue::Set(*genre_id),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

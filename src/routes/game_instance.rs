use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::{game, game_instance},
    error::AppError,
    forms::{FormData, GameInstanceForm},
    state::AppState,
    views,
};

/// Game instance CRUD router; literal segments registered before the id
/// pattern.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gameinstance/create", get(create_form).post(create))
        .route("/gameinstance/{id}/delete", get(delete_form).post(delete))
        .route("/gameinstance/{id}/update", get(update_form).post(update))
        .route("/gameinstance/{id}", get(detail))
        .route("/gameinstances", get(list))
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /catalog/gameinstances` — all copies with their games, sorted by
/// status then id.
async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let instances = game_instance::Entity::find()
        .find_also_related(game::Entity)
        .order_by_asc(game_instance::Column::Status)
        .order_by_asc(game_instance::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Html(views::game_instance::list(&instances)))
}

/// `GET /catalog/gameinstance/{id}` — copy detail with its game.
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let instance = game_instance::Entity::find_by_id(id)
        .find_also_related(game::Entity)
        .one(&state.db)
        .await?;
    let Some((instance, game)) = instance else {
        return Err(AppError::not_found("Game instance not found"));
    };
    Ok(Html(views::game_instance::detail(&instance, game.as_ref())))
}

/// `GET /catalog/gameinstance/create` — blank form with the game picker.
async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let games = all_games(&state.db).await?;
    Ok(Html(views::game_instance::form(
        "Create Game Instance",
        &GameInstanceForm::default(),
        &games,
        &[],
    )))
}

/// `POST /catalog/gameinstance/create` — validate and persist a new copy.
async fn create(State(state): State<AppState>, data: FormData) -> Result<Response, AppError> {
    let form = GameInstanceForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        let games = all_games(&state.db).await?;
        return Ok(
            Html(views::game_instance::form("Create Game Instance", &form, &games, &errors))
                .into_response(),
        );
    }
    let game_id = form
        .game_id()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("game id failed to re-parse")))?;

    let now = chrono::Utc::now();
    let instance = game_instance::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        created_at: ActiveValue::Set(now.into()),
        updated_at: ActiveValue::Set(now.into()),
        game_id: ActiveValue::Set(game_id),
        status: ActiveValue::Set(form.status_value().as_str().to_string()),
    }
    .insert(&state.db)
    .await?;

    Ok(Redirect::to(&instance.detail_url()).into_response())
}

/// `GET /catalog/gameinstance/{id}/update` — pre-filled edit form.
async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let (instance, games) = tokio::try_join!(
        game_instance::Entity::find_by_id(id).one(&state.db),
        all_games(&state.db),
    )?;
    let instance =
        instance.ok_or_else(|| AppError::not_found("Game instance not found"))?;
    let form = GameInstanceForm::from_model(&instance);
    Ok(Html(views::game_instance::form(
        "Update Game Instance",
        &form,
        &games,
        &[],
    )))
}

/// `POST /catalog/gameinstance/{id}/update` — full-record replace keyed by id.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    data: FormData,
) -> Result<Response, AppError> {
    let form = GameInstanceForm::from_form(&data);
    let errors = form.errors();
    if !errors.is_empty() {
        let games = all_games(&state.db).await?;
        return Ok(
            Html(views::game_instance::form("Update Game Instance", &form, &games, &errors))
                .into_response(),
        );
    }
    let game_id = form
        .game_id()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("game id failed to re-parse")))?;

    let model = game_instance::ActiveModel {
        id: ActiveValue::Unchanged(id),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        game_id: ActiveValue::Set(game_id),
        status: ActiveValue::Set(form.status_value().as_str().to_string()),
    };
    let instance = match model.update(&state.db).await {
        Ok(instance) => instance,
        Err(DbErr::RecordNotUpdated) => {
            return Err(AppError::not_found("Game instance not found"));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Redirect::to(&instance.detail_url()).into_response())
}

/// `GET /catalog/gameinstance/{id}/delete` — confirmation page. A copy has
/// no dependents, so deletion is always offered.
async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let instance = game_instance::Entity::find_by_id(id).one(&state.db).await?;
    let Some(instance) = instance else {
        // Already gone: deleting is an idempotent no-op.
        return Ok(Redirect::to("/catalog/gameinstances").into_response());
    };
    Ok(Html(views::game_instance::confirm_delete(&instance)).into_response())
}

/// `POST /catalog/gameinstance/{id}/delete` — delete the copy.
async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, AppError> {
    let instance = game_instance::Entity::find_by_id(id).one(&state.db).await?;
    if instance.is_some() {
        game_instance::Entity::delete_by_id(id).exec(&state.db).await?;
    }
    Ok(Redirect::to("/catalog/gameinstances").into_response())
}

// ============================================================================
// Helpers
// ============================================================================

/// Game picker for the instance form, sorted by title.
async fn all_games(db: &DatabaseConnection) -> Result<Vec<game::Model>, DbErr> {
    game::Entity::find()
        .order_by_asc(game::Column::Title)
        .all(db)
        .await
}

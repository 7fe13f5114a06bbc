use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use mealmate_recipe::{CategoryInput, DietaryTagInput, RecipeFilter, RecipeInput, ReviewInput};
use serde::Deserialize;
use serde_json::json;

use crate::{auth::AuthUser, error::AppResult, routes::AppState};

#[derive(Deserialize)]
pub struct ReplyPayload {
    pub reply: String,
}

pub async fn categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(state.recipe_query.list_categories().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let category = state.recipe_command.create_category(input).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn dietary_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(state.recipe_query.list_dietary_tags().await?))
}

pub async fn create_dietary_tag(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<DietaryTagInput>,
) -> AppResult<impl IntoResponse> {
    let tag = state.recipe_command.create_dietary_tag(input).await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<RecipeFilter>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.recipe_query.list(filter).await?))
}

pub async fn mine(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(state.recipe_query.list_by_author(user.id()).await?))
}

pub async fn favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.recipe_query.list_favorites(user.id()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    let (id, slug) = state.recipe_command.create(user.id(), input).await?;

    Ok((StatusCode::CREATED, Json(json!({"id": id, "slug": slug}))))
}

pub async fn detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.recipe_query.get(&slug, user.id()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(input): Json<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    state.recipe_command.update(user.id(), &slug, input).await?;

    Ok(Json(state.recipe_query.get(&slug, user.id()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.recipe_command.delete(user.id(), &slug).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let favorited = state
        .recipe_command
        .toggle_favorite(user.id(), &slug)
        .await?;

    Ok(Json(json!({"favorited": favorited})))
}

pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(input): Json<ReviewInput>,
) -> AppResult<impl IntoResponse> {
    let id = state
        .recipe_command
        .add_review(user.id(), &slug, input)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

pub async fn edit_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, i64)>,
    Json(input): Json<ReviewInput>,
) -> AppResult<impl IntoResponse> {
    state
        .recipe_command
        .edit_review(user.id(), &slug, id, input)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, i64)>,
) -> AppResult<impl IntoResponse> {
    state
        .recipe_command
        .delete_review(user.id(), &slug, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn reply(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, i64)>,
    Json(input): Json<ReplyPayload>,
) -> AppResult<impl IntoResponse> {
    state
        .recipe_command
        .reply(user.id(), &slug, id, &input.reply)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_reply(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, i64)>,
) -> AppResult<impl IntoResponse> {
    state
        .recipe_command
        .delete_reply(user.id(), &slug, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

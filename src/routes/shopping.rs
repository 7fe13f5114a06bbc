use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use mealmate_shopping::{ItemInput, ListTarget, ShoppingListInput};
use serde::Deserialize;
use serde_json::json;

use crate::{auth::AuthUser, error::AppResult, routes::AppState};

/// Target list as sent by clients: `"new"`, a numeric string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum TargetPayload {
    Id(i64),
    Text(String),
}

impl TargetPayload {
    fn parse(self) -> mealmate_shared::Result<ListTarget> {
        match self {
            TargetPayload::Id(id) => Ok(ListTarget::Existing(id)),
            TargetPayload::Text(text) => text.parse(),
        }
    }
}

#[derive(Deserialize)]
pub struct AddRecipePayload {
    pub shopping_list_id: TargetPayload,
}

#[derive(Deserialize)]
pub struct SharePayload {
    #[serde(default)]
    pub username: String,
}

pub async fn index(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let owned = state.shopping_query.list_owned(user.id()).await?;
    let shared = state.shopping_query.list_shared(user.id()).await?;

    Ok(Json(json!({"owned": owned, "shared": shared})))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ShoppingListInput>,
) -> AppResult<impl IntoResponse> {
    let id = state.shopping_command.create(user.id(), input).await?;

    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

pub async fn detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.shopping_query.get(id, user.id()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ShoppingListInput>,
) -> AppResult<impl IntoResponse> {
    state.shopping_command.update(user.id(), id, input).await?;

    Ok(Json(state.shopping_query.get(id, user.id()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.shopping_command.delete(user.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> AppResult<impl IntoResponse> {
    let item_id = state.shopping_command.add_item(user.id(), id, input).await?;

    Ok((StatusCode::CREATED, Json(json!({"id": item_id}))))
}

pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> AppResult<impl IntoResponse> {
    state
        .shopping_command
        .update_item(user.id(), id, input)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.shopping_command.delete_item(user.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let is_purchased = state
        .shopping_command
        .toggle_purchased(user.id(), id)
        .await?;

    Ok(Json(json!({"is_purchased": is_purchased})))
}

pub async fn share(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<SharePayload>,
) -> AppResult<impl IntoResponse> {
    let sharee_id = state
        .shopping_command
        .share(user.id(), id, &input.username)
        .await?;

    Ok(Json(json!({"user_id": sharee_id})))
}

pub async fn unshare(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, user_id)): Path<(i64, i64)>,
) -> AppResult<impl IntoResponse> {
    state
        .shopping_command
        .unshare(user.id(), id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn leave(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.shopping_command.leave(user.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(input): Json<AddRecipePayload>,
) -> AppResult<impl IntoResponse> {
    let target = input.shopping_list_id.parse()?;
    let (list_id, count) = state
        .shopping_command
        .add_recipe(user.id(), &slug, target)
        .await?;

    Ok(Json(json!({"shopping_list_id": list_id, "items": count})))
}

pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let (list_id, count) = state
        .shopping_command
        .generate_from_meal_plan(user.id(), id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"shopping_list_id": list_id, "items": count})),
    ))
}

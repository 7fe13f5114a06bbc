use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use mealmate_mealplan::{MealInput, MealPlanInput};
use serde_json::json;

use crate::{auth::AuthUser, error::AppResult, routes::AppState};

pub async fn index(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(state.mealplan_query.list(user.id()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<MealPlanInput>,
) -> AppResult<impl IntoResponse> {
    let id = state.mealplan_command.create(user.id(), input).await?;

    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

pub async fn detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.mealplan_query.get(id, user.id()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<MealPlanInput>,
) -> AppResult<impl IntoResponse> {
    state.mealplan_command.update(user.id(), id, input).await?;

    Ok(Json(state.mealplan_query.get(id, user.id()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.mealplan_command.delete(user.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<MealInput>,
) -> AppResult<impl IntoResponse> {
    let meal_id = state.mealplan_command.add_meal(user.id(), id, input).await?;

    Ok((StatusCode::CREATED, Json(json!({"id": meal_id}))))
}

pub async fn update_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<MealInput>,
) -> AppResult<impl IntoResponse> {
    state
        .mealplan_command
        .update_meal(user.id(), id, input)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.mealplan_command.delete_meal(user.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

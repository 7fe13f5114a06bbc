use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use mealmate_notification::Mailer;
use sqlx::SqlitePool;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{config::Config, session::SignupSessions};

mod account;
mod health;
mod mealplans;
mod recipes;
mod shopping;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SignupSessions,
    pub user_command: mealmate_user::Command,
    pub user_query: mealmate_user::Query,
    pub recipe_command: mealmate_recipe::Command,
    pub recipe_query: mealmate_recipe::Query,
    pub mealplan_command: mealmate_mealplan::Command,
    pub mealplan_query: mealmate_mealplan::Query,
    pub shopping_command: mealmate_shopping::Command,
    pub shopping_query: mealmate_shopping::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Config, state: mealmate_shared::State, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            sessions: SignupSessions::default(),
            user_command: mealmate_user::Command::new(state.clone(), mailer),
            user_query: mealmate_user::Query(state.clone()),
            recipe_command: mealmate_recipe::Command(state.clone()),
            recipe_query: mealmate_recipe::Query(state.clone()),
            mealplan_command: mealmate_mealplan::Command(state.clone()),
            mealplan_query: mealmate_mealplan::Query(state.clone()),
            shopping_command: mealmate_shopping::Command(state.clone()),
            shopping_query: mealmate_shopping::Query(state.clone()),
            pool: state.read_db,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/signup", post(account::signup))
        .route("/signup/verify/{otp_id}", post(account::signup_verify))
        .route("/signup/resend/{otp_id}", post(account::signup_resend))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
        .route("/otp/send", post(account::otp_send))
        .route("/otp/verify/{otp_id}", post(account::otp_verify))
        .route("/otp/resend/{otp_id}", post(account::otp_resend))
        .route("/profile", get(account::profile).post(account::update_profile))
        .route("/profile/delete", post(account::delete_account))
        .route(
            "/categories",
            get(recipes::categories).post(recipes::create_category),
        )
        .route(
            "/dietary-tags",
            get(recipes::dietary_tags).post(recipes::create_dietary_tag),
        )
        .route("/recipes", get(recipes::index).post(recipes::create))
        .route("/recipes/mine", get(recipes::mine))
        .route("/recipes/favorites", get(recipes::favorites))
        .route(
            "/recipes/{slug}",
            get(recipes::detail)
                .put(recipes::update)
                .delete(recipes::delete),
        )
        .route("/recipes/{slug}/favorite", post(recipes::favorite))
        .route("/recipes/{slug}/reviews", post(recipes::add_review))
        .route(
            "/recipes/{slug}/reviews/{id}",
            put(recipes::edit_review).delete(recipes::delete_review),
        )
        .route(
            "/recipes/{slug}/reviews/{id}/reply",
            post(recipes::reply).delete(recipes::delete_reply),
        )
        .route(
            "/recipes/{slug}/shopping-list",
            post(shopping::add_recipe),
        )
        .route(
            "/meal-plans",
            get(mealplans::index).post(mealplans::create),
        )
        .route(
            "/meal-plans/{id}",
            get(mealplans::detail)
                .put(mealplans::update)
                .delete(mealplans::delete),
        )
        .route("/meal-plans/{id}/meals", post(mealplans::add_meal))
        .route(
            "/meals/{id}",
            put(mealplans::update_meal).delete(mealplans::delete_meal),
        )
        .route(
            "/meal-plans/{id}/shopping-list",
            post(shopping::generate),
        )
        .route(
            "/shopping-lists",
            get(shopping::index).post(shopping::create),
        )
        .route(
            "/shopping-lists/{id}",
            get(shopping::detail)
                .put(shopping::update)
                .delete(shopping::delete),
        )
        .route("/shopping-lists/{id}/items", post(shopping::add_item))
        .route(
            "/shopping-items/{id}",
            put(shopping::update_item).delete(shopping::delete_item),
        )
        .route("/shopping-items/{id}/toggle", post(shopping::toggle_item))
        .route("/shopping-lists/{id}/share", post(shopping::share))
        .route(
            "/shopping-lists/{id}/share/{user_id}",
            delete(shopping::unshare),
        )
        .route("/shopping-lists/{id}/leave", post(shopping::leave))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

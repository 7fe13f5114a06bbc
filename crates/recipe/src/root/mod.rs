use std::ops::Deref;

use mealmate_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

mod create;
mod delete;
mod favorite;
mod review;
mod update;

pub use create::{IngredientInput, InstructionInput, RecipeInput};
pub use review::ReviewInput;

#[derive(Clone)]
pub struct Command(pub mealmate_shared::State);

impl Deref for Command {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Minimal projection of a recipe used for access checks.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRef {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub slug: String,
    pub is_public: bool,
}

impl RecipeRef {
    pub fn is_visible_to(&self, user_id: i64) -> bool {
        self.is_public || self.author_id == user_id
    }
}

pub enum FindRef {
    Id(i64),
    Slug(String),
}

pub async fn find_ref(
    pool: &SqlitePool,
    find: FindRef,
) -> mealmate_shared::Result<Option<RecipeRef>> {
    let mut statement = Query::select()
        .columns([
            Recipe::Id,
            Recipe::AuthorId,
            Recipe::Title,
            Recipe::Slug,
            Recipe::IsPublic,
        ])
        .from(Recipe::Table)
        .limit(1)
        .to_owned();

    match find {
        FindRef::Id(id) => statement.and_where(Expr::col(Recipe::Id).eq(id)),
        FindRef::Slug(slug) => statement.and_where(Expr::col(Recipe::Slug).eq(slug)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRef, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

impl Command {
    /// Recipe visible to `user_id`: public ones and the user's own.
    pub async fn find_visible(
        &self,
        find: FindRef,
        user_id: i64,
    ) -> mealmate_shared::Result<RecipeRef> {
        match find_ref(&self.read_db, find).await? {
            Some(recipe) if recipe.is_visible_to(user_id) => Ok(recipe),
            _ => mealmate_shared::not_found!("Recipe not found"),
        }
    }

    pub(crate) async fn find_authored(
        &self,
        slug: &str,
        user_id: i64,
    ) -> mealmate_shared::Result<RecipeRef> {
        match find_ref(&self.read_db, FindRef::Slug(slug.to_owned())).await? {
            Some(recipe) if recipe.author_id == user_id => Ok(recipe),
            _ => mealmate_shared::not_found!("Recipe not found"),
        }
    }
}

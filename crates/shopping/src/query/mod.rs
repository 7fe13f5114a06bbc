use std::ops::Deref;

use mealmate_db::table::{ShoppingList, ShoppingListShare};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

mod item;
mod list;

pub use item::*;
pub use list::*;

#[derive(Clone)]
pub struct Query(pub mealmate_shared::State);

impl Deref for Query {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShoppingListRow {
    pub id: i64,
    pub user_id: i64,
    pub meal_plan_id: Option<i64>,
    pub name: String,
    pub notes: String,
    pub is_completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// How the caller relates to a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Owner,
    Shared,
}

pub(crate) async fn find_row(
    pool: &SqlitePool,
    list_id: i64,
) -> mealmate_shared::Result<Option<ShoppingListRow>> {
    let (sql, values) = sea_query::Query::select()
        .columns([
            ShoppingList::Id,
            ShoppingList::UserId,
            ShoppingList::MealPlanId,
            ShoppingList::Name,
            ShoppingList::Notes,
            ShoppingList::IsCompleted,
            ShoppingList::CreatedAt,
            ShoppingList::UpdatedAt,
        ])
        .from(ShoppingList::Table)
        .and_where(Expr::col(ShoppingList::Id).eq(list_id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn is_sharee(
    pool: &SqlitePool,
    list_id: i64,
    user_id: i64,
) -> mealmate_shared::Result<bool> {
    let (sql, values) = sea_query::Query::select()
        .column(ShoppingListShare::UserId)
        .from(ShoppingListShare::Table)
        .and_where(Expr::col(ShoppingListShare::ShoppingListId).eq(list_id))
        .and_where(Expr::col(ShoppingListShare::UserId).eq(user_id))
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}

/// The list and the caller's access to it. Lists the caller can't see are
/// reported as missing.
pub(crate) async fn find_accessible(
    pool: &SqlitePool,
    list_id: i64,
    user_id: i64,
) -> mealmate_shared::Result<(ShoppingListRow, Access)> {
    let Some(list) = find_row(pool, list_id).await? else {
        mealmate_shared::not_found!("Shopping list not found");
    };

    if list.user_id == user_id {
        return Ok((list, Access::Owner));
    }

    if is_sharee(pool, list.id, user_id).await? {
        return Ok((list, Access::Shared));
    }

    mealmate_shared::not_found!("Shopping list not found")
}

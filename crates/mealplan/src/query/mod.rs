use std::ops::Deref;

use mealmate_db::table::MealPlan;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

mod meal;
mod plan;

pub use meal::*;
pub use plan::*;

#[derive(Clone)]
pub struct Query(pub mealmate_shared::State);

impl Deref for Query {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MealPlanRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub start_date: i64,
    pub end_date: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MealPlanRow {
    /// Timestamp of the plan day `day_of_week` (0 = start date).
    pub fn date_of(&self, day_of_week: u8) -> i64 {
        self.start_date + i64::from(day_of_week) * 86_400
    }
}

pub(crate) async fn find_row(
    pool: &SqlitePool,
    plan_id: i64,
) -> mealmate_shared::Result<Option<MealPlanRow>> {
    let (sql, values) = sea_query::Query::select()
        .columns([
            MealPlan::Id,
            MealPlan::UserId,
            MealPlan::Name,
            MealPlan::Description,
            MealPlan::StartDate,
            MealPlan::EndDate,
            MealPlan::IsActive,
            MealPlan::CreatedAt,
            MealPlan::UpdatedAt,
        ])
        .from(MealPlan::Table)
        .and_where(Expr::col(MealPlan::Id).eq(plan_id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

impl Query {
    /// Plan owned by `user_id`, any other plan is reported as missing.
    pub async fn find(&self, plan_id: i64, user_id: i64) -> mealmate_shared::Result<MealPlanRow> {
        match find_row(&self.read_db, plan_id).await? {
            Some(plan) if plan.user_id == user_id => Ok(plan),
            _ => mealmate_shared::not_found!("Meal plan not found"),
        }
    }
}

use mealmate_db::table::MealPlan;
use mealmate_shared::mealplan::{MealType, weekday_name};
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use super::{MealPlanRow, MealView};

#[derive(Debug, Clone, Serialize)]
pub struct MealPlanView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub is_current: bool,
    pub total_recipes: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(FromRow)]
struct MealPlanListRow {
    #[sqlx(flatten)]
    plan: MealPlanRow,
    total_recipes: i64,
}

impl MealPlanView {
    fn new(plan: MealPlanRow, total_recipes: i64) -> mealmate_shared::Result<Self> {
        let start = mealmate_shared::timestamp_to_date(plan.start_date)?;
        let end = mealmate_shared::timestamp_to_date(plan.end_date)?;
        let today = mealmate_shared::today();

        Ok(Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            start_date: mealmate_shared::format_date(start),
            end_date: mealmate_shared::format_date(end),
            is_active: plan.is_active,
            is_current: start <= today && today <= end,
            total_recipes,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        })
    }
}

/// One column of the weekly grid.
#[derive(Debug, Clone, Serialize)]
pub struct PlanDay {
    pub day_of_week: u8,
    pub weekday: &'static str,
    pub date: String,
    pub breakfast: Option<MealView>,
    pub lunch: Option<MealView>,
    pub dinner: Option<MealView>,
    pub snack: Option<MealView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealPlanDetail {
    #[serde(flatten)]
    pub plan: MealPlanView,
    pub meals: Vec<MealView>,
    pub days: Vec<PlanDay>,
}

fn week_grid(plan: &MealPlanRow, meals: &[MealView]) -> mealmate_shared::Result<Vec<PlanDay>> {
    let start = mealmate_shared::timestamp_to_date(plan.start_date)?;
    let mut days = Vec::with_capacity(7);

    for day_of_week in 0..7u8 {
        let first = |meal_type: MealType| {
            meals
                .iter()
                .find(|m| m.day_of_week == i64::from(day_of_week) && m.meal_type == meal_type)
                .cloned()
        };

        days.push(PlanDay {
            day_of_week,
            weekday: weekday_name(day_of_week).unwrap_or_default(),
            date: mealmate_shared::format_date(mealmate_shared::add_days(
                start,
                i64::from(day_of_week),
            )),
            breakfast: first(MealType::Breakfast),
            lunch: first(MealType::Lunch),
            dinner: first(MealType::Dinner),
            snack: first(MealType::Snack),
        });
    }

    Ok(days)
}

impl super::Query {
    /// Plans of the user, latest start date first.
    pub async fn list(&self, user_id: i64) -> mealmate_shared::Result<Vec<MealPlanView>> {
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
            .expr_as(
                Expr::cust("(SELECT COUNT(*) FROM meal WHERE meal.meal_plan_id = meal_plan.id)"),
                Alias::new("total_recipes"),
            )
            .from(MealPlan::Table)
            .and_where(Expr::col(MealPlan::UserId).eq(user_id))
            .order_by(MealPlan::StartDate, Order::Desc)
            .order_by(MealPlan::Id, Order::Desc)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, MealPlanListRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter()
            .map(|row| MealPlanView::new(row.plan, row.total_recipes))
            .collect()
    }

    pub async fn get(&self, plan_id: i64, user_id: i64) -> mealmate_shared::Result<MealPlanDetail> {
        let plan = self.find(plan_id, user_id).await?;
        let meals = self.meals_of(plan.id).await?;
        let days = week_grid(&plan, &meals)?;
        let total_recipes = meals.len() as i64;

        Ok(MealPlanDetail {
            plan: MealPlanView::new(plan, total_recipes)?,
            meals,
            days,
        })
    }
}

use mealmate_db::table::{Meal, Recipe};
use mealmate_shared::mealplan::MealType;
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
struct MealRow {
    id: i64,
    recipe_id: i64,
    recipe_title: String,
    recipe_slug: String,
    meal_type: MealType,
    day_of_week: i64,
    date: i64,
    servings: i64,
    notes: String,
    is_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealView {
    pub id: i64,
    pub recipe_id: i64,
    pub recipe_title: String,
    pub recipe_slug: String,
    pub meal_type: MealType,
    pub day_of_week: i64,
    pub date: String,
    pub servings: i64,
    pub notes: String,
    pub is_completed: bool,
}

impl TryFrom<MealRow> for MealView {
    type Error = mealmate_shared::Error;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            recipe_id: row.recipe_id,
            recipe_title: row.recipe_title,
            recipe_slug: row.recipe_slug,
            meal_type: row.meal_type,
            day_of_week: row.day_of_week,
            date: mealmate_shared::format_date(mealmate_shared::timestamp_to_date(row.date)?),
            servings: row.servings,
            notes: row.notes,
            is_completed: row.is_completed,
        })
    }
}

fn by_schedule(statement: &mut sea_query::SelectStatement) {
    statement
        .order_by((Meal::Table, Meal::Date), Order::Asc)
        .order_by((Meal::Table, Meal::MealType), Order::Asc)
        .order_by((Meal::Table, Meal::Id), Order::Asc);
}

impl super::Query {
    /// Meals of a plan ordered by date then meal type.
    pub(crate) async fn meals_of(&self, plan_id: i64) -> mealmate_shared::Result<Vec<MealView>> {
        let mut statement = sea_query::Query::select()
            .columns([
                (Meal::Table, Meal::Id),
                (Meal::Table, Meal::RecipeId),
                (Meal::Table, Meal::MealType),
                (Meal::Table, Meal::DayOfWeek),
                (Meal::Table, Meal::Date),
                (Meal::Table, Meal::Servings),
                (Meal::Table, Meal::Notes),
                (Meal::Table, Meal::IsCompleted),
            ])
            .expr_as(
                Expr::col((Recipe::Table, Recipe::Title)),
                Alias::new("recipe_title"),
            )
            .expr_as(
                Expr::col((Recipe::Table, Recipe::Slug)),
                Alias::new("recipe_slug"),
            )
            .from(Meal::Table)
            .inner_join(
                Recipe::Table,
                Expr::col((Recipe::Table, Recipe::Id)).equals((Meal::Table, Meal::RecipeId)),
            )
            .and_where(Expr::col((Meal::Table, Meal::MealPlanId)).eq(plan_id))
            .to_owned();

        by_schedule(&mut statement);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(MealView::try_from).collect()
    }

    /// Recipe of every meal of an owned plan, in schedule order.
    pub async fn meals_for_shopping(
        &self,
        plan_id: i64,
        user_id: i64,
    ) -> mealmate_shared::Result<Vec<i64>> {
        let plan = self.find(plan_id, user_id).await?;

        let mut statement = sea_query::Query::select()
            .column((Meal::Table, Meal::RecipeId))
            .from(Meal::Table)
            .and_where(Expr::col((Meal::Table, Meal::MealPlanId)).eq(plan.id))
            .to_owned();

        by_schedule(&mut statement);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

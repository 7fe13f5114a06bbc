use mealmate_db::table::{Meal, MealPlan};
use mealmate_recipe::FindRef;
use mealmate_shared::mealplan::MealType;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MealInput {
    pub recipe_id: i64,
    pub meal_type: MealType,
    #[validate(range(max = 6, message = "Day of week must be between 0 and 6"))]
    pub day_of_week: u8,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1))]
    pub servings: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_completed: bool,
}

fn default_servings() -> u32 {
    1
}

#[derive(FromRow)]
struct MealOwner {
    id: i64,
    meal_plan_id: i64,
}

impl super::Command {
    pub async fn add_meal(
        &self,
        user_id: i64,
        plan_id: i64,
        input: MealInput,
    ) -> mealmate_shared::Result<i64> {
        input.validate()?;
        let plan = self.find_owned(plan_id, user_id).await?;
        self.check_recipe(input.recipe_id, user_id).await?;

        let (sql, values) = Query::insert()
            .into_table(Meal::Table)
            .columns([
                Meal::MealPlanId,
                Meal::RecipeId,
                Meal::MealType,
                Meal::DayOfWeek,
                Meal::Date,
                Meal::Servings,
                Meal::Notes,
                Meal::IsCompleted,
                Meal::CreatedAt,
            ])
            .values_panic([
                plan.id.into(),
                input.recipe_id.into(),
                input.meal_type.to_string().into(),
                input.day_of_week.into(),
                plan.date_of(input.day_of_week).into(),
                input.servings.into(),
                input.notes.trim().into(),
                input.is_completed.into(),
                mealmate_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    pub async fn update_meal(
        &self,
        user_id: i64,
        meal_id: i64,
        input: MealInput,
    ) -> mealmate_shared::Result<()> {
        input.validate()?;
        let meal = self.find_owned_meal(meal_id, user_id).await?;
        let plan = self.find_owned(meal.meal_plan_id, user_id).await?;
        self.check_recipe(input.recipe_id, user_id).await?;

        let (sql, values) = Query::update()
            .table(Meal::Table)
            .value(Meal::RecipeId, input.recipe_id)
            .value(Meal::MealType, input.meal_type.to_string())
            .value(Meal::DayOfWeek, input.day_of_week)
            .value(Meal::Date, plan.date_of(input.day_of_week))
            .value(Meal::Servings, input.servings)
            .value(Meal::Notes, input.notes.trim())
            .value(Meal::IsCompleted, input.is_completed)
            .and_where(Expr::col(Meal::Id).eq(meal.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn delete_meal(&self, user_id: i64, meal_id: i64) -> mealmate_shared::Result<()> {
        let meal = self.find_owned_meal(meal_id, user_id).await?;

        let (sql, values) = Query::delete()
            .from_table(Meal::Table)
            .and_where(Expr::col(Meal::Id).eq(meal.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    async fn check_recipe(&self, recipe_id: i64, user_id: i64) -> mealmate_shared::Result<()> {
        match mealmate_recipe::find_ref(&self.read_db, FindRef::Id(recipe_id)).await? {
            Some(recipe) if recipe.is_visible_to(user_id) => Ok(()),
            _ => mealmate_shared::not_found!("Recipe not found"),
        }
    }

    async fn find_owned_meal(&self, meal_id: i64, user_id: i64) -> mealmate_shared::Result<MealOwner> {
        let (sql, values) = Query::select()
            .column((Meal::Table, Meal::Id))
            .column((Meal::Table, Meal::MealPlanId))
            .from(Meal::Table)
            .inner_join(
                MealPlan::Table,
                Expr::col((MealPlan::Table, MealPlan::Id)).equals((Meal::Table, Meal::MealPlanId)),
            )
            .and_where(Expr::col((Meal::Table, Meal::Id)).eq(meal_id))
            .and_where(Expr::col((MealPlan::Table, MealPlan::UserId)).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_as_with::<_, MealOwner, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        {
            Some(meal) => Ok(meal),
            None => mealmate_shared::not_found!("Meal not found"),
        }
    }
}

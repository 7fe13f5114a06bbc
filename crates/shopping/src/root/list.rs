use mealmate_db::table::ShoppingList;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqliteExecutor;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShoppingListInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// Only read on creation.
    #[serde(default)]
    pub meal_plan_id: Option<i64>,
    #[serde(default)]
    pub is_completed: bool,
}

pub(crate) async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: i64,
    meal_plan_id: Option<i64>,
    name: &str,
    notes: &str,
) -> mealmate_shared::Result<i64> {
    let now = mealmate_shared::now();
    let (sql, values) = Query::insert()
        .into_table(ShoppingList::Table)
        .columns([
            ShoppingList::UserId,
            ShoppingList::MealPlanId,
            ShoppingList::Name,
            ShoppingList::Notes,
            ShoppingList::CreatedAt,
            ShoppingList::UpdatedAt,
        ])
        .values_panic([
            user_id.into(),
            meal_plan_id.into(),
            name.into(),
            notes.into(),
            now.into(),
            now.into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .execute(executor)
        .await?
        .last_insert_rowid())
}

impl super::Command {
    pub async fn create(
        &self,
        user_id: i64,
        input: ShoppingListInput,
    ) -> mealmate_shared::Result<i64> {
        input.validate()?;

        if let Some(plan_id) = input.meal_plan_id {
            mealmate_mealplan::Query(self.0.clone())
                .find(plan_id, user_id)
                .await?;
        }

        insert(
            &self.write_db,
            user_id,
            input.meal_plan_id,
            input.name.trim(),
            input.notes.trim(),
        )
        .await
    }

    pub async fn update(
        &self,
        user_id: i64,
        list_id: i64,
        input: ShoppingListInput,
    ) -> mealmate_shared::Result<()> {
        input.validate()?;
        let list = self
            .find_owned(list_id, user_id, "Only the owner can edit list details")
            .await?;

        let (sql, values) = Query::update()
            .table(ShoppingList::Table)
            .value(ShoppingList::Name, input.name.trim())
            .value(ShoppingList::Notes, input.notes.trim())
            .value(ShoppingList::IsCompleted, input.is_completed)
            .value(ShoppingList::UpdatedAt, mealmate_shared::now())
            .and_where(Expr::col(ShoppingList::Id).eq(list.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn delete(&self, user_id: i64, list_id: i64) -> mealmate_shared::Result<()> {
        let list = self
            .find_owned(list_id, user_id, "Only the owner can delete this list")
            .await?;

        let (sql, values) = Query::delete()
            .from_table(ShoppingList::Table)
            .and_where(Expr::col(ShoppingList::Id).eq(list.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}

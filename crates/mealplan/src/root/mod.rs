use std::ops::Deref;

use mealmate_db::table::{Meal, MealPlan};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::Date;
use validator::Validate;

use crate::MealPlanRow;

mod meal;

pub use meal::MealInput;

#[derive(Clone)]
pub struct Command(pub mealmate_shared::State);

impl Deref for Command {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MealPlanInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl MealPlanInput {
    /// Start and end dates, the end defaulting to the sixth day after start.
    fn range(&self) -> mealmate_shared::Result<(Date, Date)> {
        let start = mealmate_shared::parse_date(&self.start_date)?;
        let end = match self.end_date.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => mealmate_shared::parse_date(value)?,
            None => mealmate_shared::add_days(start, 6),
        };

        if end < start {
            mealmate_shared::user!("End date must be on or after start date.");
        }

        Ok((start, end))
    }
}

impl Command {
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, user_id: i64, input: MealPlanInput) -> mealmate_shared::Result<i64> {
        input.validate()?;
        let (start, end) = input.range()?;
        let now = mealmate_shared::now();

        let (sql, values) = Query::insert()
            .into_table(MealPlan::Table)
            .columns([
                MealPlan::UserId,
                MealPlan::Name,
                MealPlan::Description,
                MealPlan::StartDate,
                MealPlan::EndDate,
                MealPlan::IsActive,
                MealPlan::CreatedAt,
                MealPlan::UpdatedAt,
            ])
            .values_panic([
                user_id.into(),
                input.name.trim().into(),
                input.description.trim().into(),
                mealmate_shared::date_to_timestamp(start).into(),
                mealmate_shared::date_to_timestamp(end).into(),
                input.is_active.into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    /// Moving the start date moves every meal along with it.
    pub async fn update(
        &self,
        user_id: i64,
        plan_id: i64,
        input: MealPlanInput,
    ) -> mealmate_shared::Result<()> {
        input.validate()?;
        let plan = self.find_owned(plan_id, user_id).await?;
        let (start, end) = input.range()?;
        let start = mealmate_shared::date_to_timestamp(start);

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = Query::update()
            .table(MealPlan::Table)
            .value(MealPlan::Name, input.name.trim())
            .value(MealPlan::Description, input.description.trim())
            .value(MealPlan::StartDate, start)
            .value(MealPlan::EndDate, mealmate_shared::date_to_timestamp(end))
            .value(MealPlan::IsActive, input.is_active)
            .value(MealPlan::UpdatedAt, mealmate_shared::now())
            .and_where(Expr::col(MealPlan::Id).eq(plan.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if start != plan.start_date {
            let (sql, values) = Query::update()
                .table(Meal::Table)
                .value(
                    Meal::Date,
                    Expr::val(start).add(Expr::col(Meal::DayOfWeek).mul(86_400)),
                )
                .and_where(Expr::col(Meal::MealPlanId).eq(plan.id))
                .build_sqlx(SqliteQueryBuilder);

            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn delete(&self, user_id: i64, plan_id: i64) -> mealmate_shared::Result<()> {
        let plan = self.find_owned(plan_id, user_id).await?;

        let (sql, values) = Query::delete()
            .from_table(MealPlan::Table)
            .and_where(Expr::col(MealPlan::Id).eq(plan.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub(crate) async fn find_owned(
        &self,
        plan_id: i64,
        user_id: i64,
    ) -> mealmate_shared::Result<MealPlanRow> {
        match crate::query::find_row(&self.read_db, plan_id).await? {
            Some(plan) if plan.user_id == user_id => Ok(plan),
            _ => mealmate_shared::not_found!("Meal plan not found"),
        }
    }
}

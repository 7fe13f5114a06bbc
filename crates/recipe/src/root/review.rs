use mealmate_db::table::Review;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use super::{FindRef, RecipeRef};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewInput {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl super::Command {
    pub async fn add_review(
        &self,
        user_id: i64,
        slug: &str,
        input: ReviewInput,
    ) -> mealmate_shared::Result<i64> {
        input.validate()?;

        let recipe = self
            .find_visible(FindRef::Slug(slug.to_owned()), user_id)
            .await?;

        if recipe.author_id == user_id {
            mealmate_shared::user!("You cannot review your own recipe.");
        }

        let (sql, values) = Query::select()
            .column(Review::Id)
            .from(Review::Table)
            .and_where(Expr::col(Review::RecipeId).eq(recipe.id))
            .and_where(Expr::col(Review::UserId).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        if sqlx::query_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            mealmate_shared::user!("You have already reviewed this recipe.");
        }

        let now = mealmate_shared::now();
        let (sql, values) = Query::insert()
            .into_table(Review::Table)
            .columns([
                Review::RecipeId,
                Review::UserId,
                Review::Rating,
                Review::Comment,
                Review::CreatedAt,
                Review::UpdatedAt,
            ])
            .values_panic([
                recipe.id.into(),
                user_id.into(),
                input.rating.into(),
                input.comment.trim().into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn edit_review(
        &self,
        user_id: i64,
        slug: &str,
        review_id: i64,
        input: ReviewInput,
    ) -> mealmate_shared::Result<()> {
        input.validate()?;

        let recipe = self
            .find_visible(FindRef::Slug(slug.to_owned()), user_id)
            .await?;

        let (sql, values) = Query::update()
            .table(Review::Table)
            .value(Review::Rating, input.rating)
            .value(Review::Comment, input.comment.trim())
            .value(Review::UpdatedAt, mealmate_shared::now())
            .and_where(Expr::col(Review::Id).eq(review_id))
            .and_where(Expr::col(Review::RecipeId).eq(recipe.id))
            .and_where(Expr::col(Review::UserId).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        self.expect_one_review(sql, values).await
    }

    pub async fn delete_review(
        &self,
        user_id: i64,
        slug: &str,
        review_id: i64,
    ) -> mealmate_shared::Result<()> {
        let recipe = self
            .find_visible(FindRef::Slug(slug.to_owned()), user_id)
            .await?;

        let (sql, values) = Query::delete()
            .from_table(Review::Table)
            .and_where(Expr::col(Review::Id).eq(review_id))
            .and_where(Expr::col(Review::RecipeId).eq(recipe.id))
            .and_where(Expr::col(Review::UserId).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        self.expect_one_review(sql, values).await
    }

    /// Only the recipe author may reply.
    pub async fn reply(
        &self,
        user_id: i64,
        slug: &str,
        review_id: i64,
        reply: &str,
    ) -> mealmate_shared::Result<()> {
        let recipe = self.find_authored(slug, user_id).await?;
        let reply = reply.trim();

        if reply.is_empty() {
            mealmate_shared::user!("Reply cannot be empty.");
        }

        self.set_reply(&recipe, review_id, reply).await
    }

    pub async fn delete_reply(
        &self,
        user_id: i64,
        slug: &str,
        review_id: i64,
    ) -> mealmate_shared::Result<()> {
        let recipe = self.find_authored(slug, user_id).await?;

        self.set_reply(&recipe, review_id, "").await
    }

    async fn set_reply(
        &self,
        recipe: &RecipeRef,
        review_id: i64,
        reply: &str,
    ) -> mealmate_shared::Result<()> {
        let (sql, values) = Query::update()
            .table(Review::Table)
            .value(Review::Reply, reply)
            .and_where(Expr::col(Review::Id).eq(review_id))
            .and_where(Expr::col(Review::RecipeId).eq(recipe.id))
            .build_sqlx(SqliteQueryBuilder);

        self.expect_one_review(sql, values).await
    }

    async fn expect_one_review(
        &self,
        sql: String,
        values: sea_query_sqlx::SqlxValues,
    ) -> mealmate_shared::Result<()> {
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            mealmate_shared::not_found!("Review not found");
        }

        Ok(())
    }
}

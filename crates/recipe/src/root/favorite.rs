use mealmate_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::FindRef;

impl super::Command {
    /// Adds or removes the recipe from the user's favorites. Returns whether it
    /// is now a favorite.
    pub async fn toggle_favorite(&self, user_id: i64, slug: &str) -> mealmate_shared::Result<bool> {
        let recipe = self
            .find_visible(FindRef::Slug(slug.to_owned()), user_id)
            .await?;

        let (sql, values) = Query::delete()
            .from_table(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe.id))
            .build_sqlx(SqliteQueryBuilder);

        let removed = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected();

        if removed > 0 {
            return Ok(false);
        }

        let (sql, values) = Query::insert()
            .into_table(Favorite::Table)
            .columns([Favorite::UserId, Favorite::RecipeId, Favorite::CreatedAt])
            .values_panic([
                user_id.into(),
                recipe.id.into(),
                mealmate_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(true)
    }
}

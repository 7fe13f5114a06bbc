use mealmate_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: i64, slug: &str) -> mealmate_shared::Result<()> {
        let recipe = self.find_authored(slug, user_id).await?;

        let (sql, values) = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(recipe.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!(recipe_id = recipe.id, "Recipe deleted");

        Ok(())
    }
}

use mealmate_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use super::create::{RecipeInput, replace_children};

impl super::Command {
    /// Author-only. The slug is kept so existing links stay valid; children
    /// are replaced wholesale.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        user_id: i64,
        slug: &str,
        input: RecipeInput,
    ) -> mealmate_shared::Result<()> {
        let recipe = self.find_authored(slug, user_id).await?;
        let input = input.normalize();
        input.validate()?;
        self.check_references(&input).await?;

        let statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::CategoryId, input.category_id)
            .value(Recipe::Title, input.title.to_owned())
            .value(Recipe::Description, input.description.to_owned())
            .value(Recipe::PrepTime, input.prep_time)
            .value(Recipe::CookTime, input.cook_time)
            .value(Recipe::Servings, input.servings)
            .value(Recipe::Difficulty, input.difficulty.to_string())
            .value(Recipe::Calories, input.calories)
            .value(Recipe::IsPublic, input.is_public)
            .value(Recipe::UpdatedAt, mealmate_shared::now())
            .and_where(Expr::col(Recipe::Id).eq(recipe.id))
            .to_owned();

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        replace_children(&mut tx, recipe.id, &input).await?;

        tx.commit().await?;

        Ok(())
    }
}

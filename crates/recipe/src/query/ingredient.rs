use std::collections::HashMap;

use mealmate_db::table::Ingredient;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub recipe_id: i64,
    pub name: String,
    pub amount: String,
    pub position: i64,
}

impl super::Query {
    /// Ingredients of each recipe, in (position, id) order.
    pub async fn ingredients_of(
        &self,
        recipe_ids: &[i64],
    ) -> mealmate_shared::Result<HashMap<i64, Vec<IngredientRow>>> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let (sql, values) = sea_query::Query::select()
            .columns([
                Ingredient::Id,
                Ingredient::RecipeId,
                Ingredient::Name,
                Ingredient::Amount,
                Ingredient::Position,
            ])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::RecipeId).is_in(recipe_ids.iter().copied()))
            .order_by(Ingredient::RecipeId, Order::Asc)
            .order_by(Ingredient::Position, Order::Asc)
            .order_by(Ingredient::Id, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut ingredients: HashMap<i64, Vec<IngredientRow>> = HashMap::new();
        for row in rows {
            ingredients.entry(row.recipe_id).or_default().push(row);
        }

        Ok(ingredients)
    }
}

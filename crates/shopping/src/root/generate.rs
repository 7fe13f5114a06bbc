use std::{collections::HashMap, str::FromStr};

use mealmate_db::table::ShoppingListItem;
use mealmate_recipe::FindRef;
use mealmate_shared::shopping::ItemCategory;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use super::{item, list};
use crate::{aggregate, merge_quantity, name_key};

/// Where `add_recipe` puts the ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    New,
    Existing(i64),
}

impl FromStr for ListTarget {
    type Err = mealmate_shared::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "new" => Ok(ListTarget::New),
            value => value
                .parse()
                .map(ListTarget::Existing)
                .map_err(|_| mealmate_shared::Error::User(format!("Invalid shopping list '{value}'"))),
        }
    }
}

#[derive(FromRow)]
struct ExistingItem {
    id: i64,
    name: String,
    quantity: String,
}

impl super::Command {
    /// Creates a list holding every ingredient of the plan's meals.
    /// Returns the new list id and its number of items.
    #[tracing::instrument(skip(self))]
    pub async fn generate_from_meal_plan(
        &self,
        user_id: i64,
        plan_id: i64,
    ) -> mealmate_shared::Result<(i64, usize)> {
        let plans = mealmate_mealplan::Query(self.0.clone());
        let plan = plans.find(plan_id, user_id).await?;
        let recipe_ids = plans.meals_for_shopping(plan.id, user_id).await?;

        let ingredients = mealmate_recipe::Query(self.0.clone())
            .ingredients_of(&recipe_ids)
            .await?;

        let items = aggregate(
            recipe_ids
                .iter()
                .filter_map(|id| ingredients.get(id))
                .flatten()
                .map(|i| (i.name.as_str(), i.amount.as_str())),
        );

        let mut tx = self.write_db.begin().await?;

        let list_id = list::insert(
            &mut *tx,
            user_id,
            Some(plan.id),
            &format!("Shopping for {}", plan.name),
            "",
        )
        .await?;

        let new_items = items
            .iter()
            .enumerate()
            .map(|(position, i)| item::NewItem {
                name: &i.name,
                quantity: &i.quantity,
                category: ItemCategory::Other,
                is_priority: false,
                notes: "",
                position: position as i64,
            })
            .collect::<Vec<_>>();

        item::insert(&mut *tx, list_id, &new_items).await?;

        tx.commit().await?;

        tracing::info!(list_id, items = items.len(), "Shopping list generated");

        Ok((list_id, items.len()))
    }

    /// Adds each ingredient of a recipe to a list, appending to the quantity
    /// of an item with the same name. Returns the list id and the number of
    /// ingredients processed.
    #[tracing::instrument(skip(self))]
    pub async fn add_recipe(
        &self,
        user_id: i64,
        slug: &str,
        target: ListTarget,
    ) -> mealmate_shared::Result<(i64, usize)> {
        let recipe = match mealmate_recipe::find_ref(&self.read_db, FindRef::Slug(slug.to_owned()))
            .await?
        {
            Some(recipe) if recipe.is_visible_to(user_id) => recipe,
            _ => mealmate_shared::not_found!("Recipe not found"),
        };

        let ingredients = mealmate_recipe::Query(self.0.clone())
            .ingredients_of(&[recipe.id])
            .await?
            .remove(&recipe.id)
            .unwrap_or_default();

        let existing_list = match target {
            ListTarget::Existing(id) => Some(self.find_accessible(id, user_id).await?.0.id),
            ListTarget::New => None,
        };

        let mut tx = self.write_db.begin().await?;

        let list_id = match existing_list {
            Some(id) => id,
            None => {
                list::insert(
                    &mut *tx,
                    user_id,
                    None,
                    &format!("Shopping for {}", recipe.title),
                    "",
                )
                .await?
            }
        };

        let note = format!("From {}", recipe.title);
        let mut position = item::next_position(&mut *tx, list_id).await?;

        let (sql, values) = Query::select()
            .columns([
                ShoppingListItem::Id,
                ShoppingListItem::Name,
                ShoppingListItem::Quantity,
            ])
            .from(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::ShoppingListId).eq(list_id))
            .order_by(ShoppingListItem::Id, sea_query::Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, ExistingItem, _>(&sql, values)
            .fetch_all(&mut *tx)
            .await?;

        let mut existing: HashMap<String, ExistingItem> = HashMap::new();
        for row in rows {
            existing.entry(name_key(&row.name)).or_insert(row);
        }

        for ingredient in ingredients.iter() {
            let key = name_key(&ingredient.name);

            if let Some(found) = existing.get_mut(&key) {
                found.quantity = merge_quantity(&found.quantity, &ingredient.amount);

                let (sql, values) = Query::update()
                    .table(ShoppingListItem::Table)
                    .value(ShoppingListItem::Quantity, found.quantity.to_owned())
                    .and_where(Expr::col(ShoppingListItem::Id).eq(found.id))
                    .build_sqlx(SqliteQueryBuilder);

                sqlx::query_with(&sql, values).execute(&mut *tx).await?;
                continue;
            }

            let id = item::insert(
                &mut *tx,
                list_id,
                &[item::NewItem {
                    name: &ingredient.name,
                    quantity: &ingredient.amount,
                    category: ItemCategory::Other,
                    is_priority: false,
                    notes: &note,
                    position,
                }],
            )
            .await?;

            existing.insert(
                key,
                ExistingItem {
                    id,
                    name: ingredient.name.to_owned(),
                    quantity: ingredient.amount.to_owned(),
                },
            );
            position += 1;
        }

        tx.commit().await?;

        Ok((list_id, ingredients.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::ListTarget;

    #[test]
    fn parses_list_target() {
        assert_eq!("new".parse::<ListTarget>().unwrap(), ListTarget::New);
        assert_eq!(" 12 ".parse::<ListTarget>().unwrap(), ListTarget::Existing(12));
        assert!("twelve".parse::<ListTarget>().is_err());
    }
}

use mealmate_db::table::{ShoppingList, ShoppingListShare, User};
use sea_query::{Alias, Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use super::{Access, ItemRow, Section, sections};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShoppingListSummary {
    pub id: i64,
    pub user_id: i64,
    pub owner_name: String,
    pub meal_plan_id: Option<i64>,
    pub name: String,
    pub notes: String,
    pub is_completed: bool,
    pub total_items: i64,
    pub completed_items: i64,
    #[sqlx(skip)]
    pub completion_percentage: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sharee {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingListDetail {
    #[serde(flatten)]
    pub list: ShoppingListSummary,
    pub access: Access,
    pub items: Vec<ItemRow>,
    pub sections: Vec<Section>,
    pub shared_with: Vec<Sharee>,
}

/// Integer share of purchased items, 0 for an empty list.
pub fn completion_percentage(completed: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }

    completed * 100 / total
}

fn select_summary() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            (ShoppingList::Table, ShoppingList::Id),
            (ShoppingList::Table, ShoppingList::UserId),
            (ShoppingList::Table, ShoppingList::MealPlanId),
            (ShoppingList::Table, ShoppingList::Name),
            (ShoppingList::Table, ShoppingList::Notes),
            (ShoppingList::Table, ShoppingList::IsCompleted),
            (ShoppingList::Table, ShoppingList::CreatedAt),
            (ShoppingList::Table, ShoppingList::UpdatedAt),
        ])
        .expr_as(
            Expr::col((User::Table, User::Username)),
            Alias::new("owner_name"),
        )
        .expr_as(
            Expr::cust(
                "(SELECT COUNT(*) FROM shopping_list_item WHERE shopping_list_item.shopping_list_id = shopping_list.id)",
            ),
            Alias::new("total_items"),
        )
        .expr_as(
            Expr::cust(
                "(SELECT COUNT(*) FROM shopping_list_item WHERE shopping_list_item.shopping_list_id = shopping_list.id AND shopping_list_item.is_purchased = 1)",
            ),
            Alias::new("completed_items"),
        )
        .from(ShoppingList::Table)
        .inner_join(
            User::Table,
            Expr::col((User::Table, User::Id)).equals((ShoppingList::Table, ShoppingList::UserId)),
        )
        .order_by((ShoppingList::Table, ShoppingList::CreatedAt), Order::Desc)
        .order_by((ShoppingList::Table, ShoppingList::Id), Order::Desc)
        .to_owned()
}

impl super::Query {
    async fn fetch_summaries(
        &self,
        statement: SelectStatement,
    ) -> mealmate_shared::Result<Vec<ShoppingListSummary>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let mut lists = sqlx::query_as_with::<_, ShoppingListSummary, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        for list in lists.iter_mut() {
            list.completion_percentage = completion_percentage(list.completed_items, list.total_items);
        }

        Ok(lists)
    }

    /// Lists created by the user, newest first.
    pub async fn list_owned(&self, user_id: i64) -> mealmate_shared::Result<Vec<ShoppingListSummary>> {
        let statement = select_summary()
            .and_where(Expr::col((ShoppingList::Table, ShoppingList::UserId)).eq(user_id))
            .to_owned();

        self.fetch_summaries(statement).await
    }

    /// Lists other users shared with this one, newest first.
    pub async fn list_shared(&self, user_id: i64) -> mealmate_shared::Result<Vec<ShoppingListSummary>> {
        let statement = select_summary()
            .inner_join(
                ShoppingListShare::Table,
                Expr::col((ShoppingListShare::Table, ShoppingListShare::ShoppingListId))
                    .equals((ShoppingList::Table, ShoppingList::Id)),
            )
            .and_where(Expr::col((ShoppingListShare::Table, ShoppingListShare::UserId)).eq(user_id))
            .and_where(Expr::col((ShoppingList::Table, ShoppingList::UserId)).ne(user_id))
            .to_owned();

        self.fetch_summaries(statement).await
    }

    pub async fn get(
        &self,
        list_id: i64,
        user_id: i64,
    ) -> mealmate_shared::Result<ShoppingListDetail> {
        let (_, access) = super::find_accessible(&self.read_db, list_id, user_id).await?;

        let statement = select_summary()
            .and_where(Expr::col((ShoppingList::Table, ShoppingList::Id)).eq(list_id))
            .to_owned();

        let Some(list) = self.fetch_summaries(statement).await?.into_iter().next() else {
            mealmate_shared::not_found!("Shopping list not found");
        };

        let items = self.items_of(list.id).await?;

        let (sql, values) = sea_query::Query::select()
            .column((User::Table, User::Id))
            .column((User::Table, User::Username))
            .from(ShoppingListShare::Table)
            .inner_join(
                User::Table,
                Expr::col((User::Table, User::Id))
                    .equals((ShoppingListShare::Table, ShoppingListShare::UserId)),
            )
            .and_where(
                Expr::col((ShoppingListShare::Table, ShoppingListShare::ShoppingListId)).eq(list.id),
            )
            .order_by((User::Table, User::Username), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let shared_with = sqlx::query_as_with::<_, Sharee, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(ShoppingListDetail {
            sections: sections(&items),
            list,
            access,
            items,
            shared_with,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::completion_percentage;

    #[test]
    fn completion_rounds_down() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 66);
        assert_eq!(completion_percentage(4, 4), 100);
    }
}

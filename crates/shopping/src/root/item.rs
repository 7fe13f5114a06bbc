use mealmate_db::table::ShoppingListItem;
use mealmate_shared::shopping::ItemCategory;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::{SqliteExecutor, prelude::FromRow};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ItemInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub quantity: String,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default)]
    pub is_priority: bool,
    #[serde(default)]
    pub notes: String,
}

pub(crate) struct NewItem<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
    pub category: ItemCategory,
    pub is_priority: bool,
    pub notes: &'a str,
    pub position: i64,
}

/// Inserts the items in order and returns the id of the last one.
pub(crate) async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    list_id: i64,
    items: &[NewItem<'_>],
) -> mealmate_shared::Result<i64> {
    if items.is_empty() {
        return Ok(0);
    }

    let now = mealmate_shared::now();
    let mut statement = Query::insert()
        .into_table(ShoppingListItem::Table)
        .columns([
            ShoppingListItem::ShoppingListId,
            ShoppingListItem::Name,
            ShoppingListItem::Quantity,
            ShoppingListItem::Category,
            ShoppingListItem::IsPriority,
            ShoppingListItem::Notes,
            ShoppingListItem::Position,
            ShoppingListItem::CreatedAt,
        ])
        .to_owned();

    for item in items {
        statement.values_panic([
            list_id.into(),
            item.name.into(),
            item.quantity.into(),
            item.category.to_string().into(),
            item.is_priority.into(),
            item.notes.into(),
            item.position.into(),
            now.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .execute(executor)
        .await?
        .last_insert_rowid())
}

/// Position after the last item of the list.
pub(crate) async fn next_position<'e>(
    executor: impl SqliteExecutor<'e>,
    list_id: i64,
) -> mealmate_shared::Result<i64> {
    let (sql, values) = Query::select()
        .expr(Expr::cust("COALESCE(MAX(position) + 1, 0)"))
        .from(ShoppingListItem::Table)
        .and_where(Expr::col(ShoppingListItem::ShoppingListId).eq(list_id))
        .build_sqlx(SqliteQueryBuilder);

    let (position,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(executor)
        .await?;

    Ok(position)
}

#[derive(FromRow)]
struct ItemRef {
    id: i64,
    shopping_list_id: i64,
    is_purchased: bool,
}

impl super::Command {
    /// Owner and sharees may add items.
    pub async fn add_item(
        &self,
        user_id: i64,
        list_id: i64,
        input: ItemInput,
    ) -> mealmate_shared::Result<i64> {
        input.validate()?;
        let (list, _) = self.find_accessible(list_id, user_id).await?;

        let mut tx = self.write_db.begin().await?;
        let position = next_position(&mut *tx, list.id).await?;

        let id = insert(
            &mut *tx,
            list.id,
            &[NewItem {
                name: input.name.trim(),
                quantity: input.quantity.trim(),
                category: input.category,
                is_priority: input.is_priority,
                notes: input.notes.trim(),
                position,
            }],
        )
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        input: ItemInput,
    ) -> mealmate_shared::Result<()> {
        input.validate()?;
        let item = self.find_item(item_id, user_id).await?;

        let (sql, values) = Query::update()
            .table(ShoppingListItem::Table)
            .value(ShoppingListItem::Name, input.name.trim())
            .value(ShoppingListItem::Quantity, input.quantity.trim())
            .value(ShoppingListItem::Category, input.category.to_string())
            .value(ShoppingListItem::IsPriority, input.is_priority)
            .value(ShoppingListItem::Notes, input.notes.trim())
            .and_where(Expr::col(ShoppingListItem::Id).eq(item.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn delete_item(&self, user_id: i64, item_id: i64) -> mealmate_shared::Result<()> {
        let item = self.find_item(item_id, user_id).await?;

        let (sql, values) = Query::delete()
            .from_table(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::Id).eq(item.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    /// Flips the purchased flag and returns its new value.
    pub async fn toggle_purchased(&self, user_id: i64, item_id: i64) -> mealmate_shared::Result<bool> {
        let item = self.find_item(item_id, user_id).await?;
        let is_purchased = !item.is_purchased;

        let (sql, values) = Query::update()
            .table(ShoppingListItem::Table)
            .value(ShoppingListItem::IsPurchased, is_purchased)
            .and_where(Expr::col(ShoppingListItem::Id).eq(item.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(is_purchased)
    }

    async fn find_item(&self, item_id: i64, user_id: i64) -> mealmate_shared::Result<ItemRef> {
        let (sql, values) = Query::select()
            .columns([
                ShoppingListItem::Id,
                ShoppingListItem::ShoppingListId,
                ShoppingListItem::IsPurchased,
            ])
            .from(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::Id).eq(item_id))
            .build_sqlx(SqliteQueryBuilder);

        let Some(item) = sqlx::query_as_with::<_, ItemRef, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            mealmate_shared::not_found!("Item not found");
        };

        self.find_accessible(item.shopping_list_id, user_id).await?;

        Ok(item)
    }
}

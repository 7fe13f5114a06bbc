use mealmate_db::table::ShoppingListItem;
use mealmate_shared::shopping::ItemCategory;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub shopping_list_id: i64,
    pub name: String,
    pub quantity: String,
    pub category: ItemCategory,
    pub is_purchased: bool,
    pub is_priority: bool,
    pub notes: String,
    pub position: i64,
    pub created_at: i64,
}

impl ItemRow {
    /// Items added from a recipe are grouped under that recipe, the rest under
    /// their category.
    pub fn section(&self) -> &str {
        match self.notes.strip_prefix("From ") {
            Some(title) => title,
            None => self.category.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: String,
    pub items: Vec<ItemRow>,
}

pub fn sections(items: &[ItemRow]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for item in items {
        match sections.iter_mut().find(|s| s.name == item.section()) {
            Some(section) => section.items.push(item.clone()),
            None => sections.push(Section {
                name: item.section().to_owned(),
                items: vec![item.clone()],
            }),
        }
    }

    sections
}

impl super::Query {
    /// Unpurchased first, then by category, position and name.
    pub(crate) async fn items_of(&self, list_id: i64) -> mealmate_shared::Result<Vec<ItemRow>> {
        let (sql, values) = sea_query::Query::select()
            .columns([
                ShoppingListItem::Id,
                ShoppingListItem::ShoppingListId,
                ShoppingListItem::Name,
                ShoppingListItem::Quantity,
                ShoppingListItem::Category,
                ShoppingListItem::IsPurchased,
                ShoppingListItem::IsPriority,
                ShoppingListItem::Notes,
                ShoppingListItem::Position,
                ShoppingListItem::CreatedAt,
            ])
            .from(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::ShoppingListId).eq(list_id))
            .order_by(ShoppingListItem::IsPurchased, Order::Asc)
            .order_by(ShoppingListItem::Category, Order::Asc)
            .order_by(ShoppingListItem::Position, Order::Asc)
            .order_by(ShoppingListItem::Name, Order::Asc)
            .order_by(ShoppingListItem::Id, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ItemRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}

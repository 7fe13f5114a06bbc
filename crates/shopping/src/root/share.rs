use mealmate_db::table::{ShoppingListShare, User};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::Access;

impl super::Command {
    /// Gives `username` access to the list. Returns the sharee's id.
    pub async fn share(
        &self,
        user_id: i64,
        list_id: i64,
        username: &str,
    ) -> mealmate_shared::Result<i64> {
        let list = self
            .find_owned(list_id, user_id, "Only the owner can share this list")
            .await?;
        let username = username.trim();

        if username.is_empty() {
            mealmate_shared::user!("Please enter a username.");
        }

        let (sql, values) = Query::select()
            .column(User::Id)
            .from(User::Table)
            .and_where(Expr::col(User::Username).eq(username))
            .build_sqlx(SqliteQueryBuilder);

        let Some((sharee_id,)) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            mealmate_shared::not_found!("User \"{}\" not found.", username);
        };

        if sharee_id == list.user_id {
            mealmate_shared::user!("You cannot share a list with yourself.");
        }

        if crate::query::is_sharee(&self.read_db, list.id, sharee_id).await? {
            mealmate_shared::user!("List is already shared with {}.", username);
        }

        let (sql, values) = Query::insert()
            .into_table(ShoppingListShare::Table)
            .columns([ShoppingListShare::ShoppingListId, ShoppingListShare::UserId])
            .values_panic([list.id.into(), sharee_id.into()])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!(list_id = list.id, sharee_id, "Shopping list shared");

        Ok(sharee_id)
    }

    pub async fn unshare(
        &self,
        user_id: i64,
        list_id: i64,
        sharee_id: i64,
    ) -> mealmate_shared::Result<()> {
        let list = self
            .find_owned(list_id, user_id, "Only the owner can manage sharing")
            .await?;

        if self.remove_sharee(list.id, sharee_id).await? == 0 {
            mealmate_shared::not_found!("List is not shared with this user");
        }

        Ok(())
    }

    /// A sharee removes the list from their shared lists.
    pub async fn leave(&self, user_id: i64, list_id: i64) -> mealmate_shared::Result<()> {
        match self.find_accessible(list_id, user_id).await? {
            (list, Access::Shared) => {
                self.remove_sharee(list.id, user_id).await?;
                Ok(())
            }
            (_, Access::Owner) => mealmate_shared::user!("You own this list."),
        }
    }

    async fn remove_sharee(&self, list_id: i64, sharee_id: i64) -> mealmate_shared::Result<u64> {
        let (sql, values) = Query::delete()
            .from_table(ShoppingListShare::Table)
            .and_where(Expr::col(ShoppingListShare::ShoppingListId).eq(list_id))
            .and_where(Expr::col(ShoppingListShare::UserId).eq(sharee_id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected())
    }
}

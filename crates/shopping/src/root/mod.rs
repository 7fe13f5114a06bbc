use std::ops::Deref;

use crate::{Access, ShoppingListRow};

mod generate;
mod item;
mod list;
mod share;

pub use generate::ListTarget;
pub use item::ItemInput;
pub use list::ShoppingListInput;

#[derive(Clone)]
pub struct Command(pub mealmate_shared::State);

impl Deref for Command {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub(crate) async fn find_accessible(
        &self,
        list_id: i64,
        user_id: i64,
    ) -> mealmate_shared::Result<(ShoppingListRow, Access)> {
        crate::query::find_accessible(&self.read_db, list_id, user_id).await
    }

    /// The list when `user_id` owns it. Sharees get `message` as a forbidden
    /// error, anyone else a not-found.
    pub(crate) async fn find_owned(
        &self,
        list_id: i64,
        user_id: i64,
        message: &str,
    ) -> mealmate_shared::Result<ShoppingListRow> {
        match self.find_accessible(list_id, user_id).await? {
            (list, Access::Owner) => Ok(list),
            (_, Access::Shared) => mealmate_shared::forbidden!("{}", message),
        }
    }
}

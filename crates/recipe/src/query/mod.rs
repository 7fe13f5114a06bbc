mod ingredient;
mod recipe;

use std::ops::Deref;

pub use ingredient::*;
pub use recipe::*;

#[derive(Clone)]
pub struct Query(pub mealmate_shared::State);

impl Deref for Query {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

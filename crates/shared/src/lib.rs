mod date;
mod error;
pub mod mealplan;
pub mod recipe;
pub mod shopping;

pub use date::*;
pub use error::*;

#[doc(hidden)]
pub use anyhow as __anyhow;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

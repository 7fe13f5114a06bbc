use std::{path::PathBuf, str::FromStr};

use mealmate_recipe::{IngredientInput, RecipeInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub state: mealmate_shared::State,
    pub pool: SqlitePool,
}

impl TestState {
    pub fn command(&self) -> mealmate_mealplan::Command {
        mealmate_mealplan::Command(self.state.clone())
    }

    pub fn query(&self) -> mealmate_mealplan::Query {
        mealmate_mealplan::Query(self.state.clone())
    }
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealmate_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        state: mealmate_shared::State {
            read_db: pool.clone(),
            write_db: pool.clone(),
        },
        pool,
    })
}

pub async fn create_user(state: &TestState, name: &str) -> anyhow::Result<i64> {
    let id = sqlx::query(
        "INSERT INTO user (username, email, password, email_verified, bio, created_at) VALUES (?, ?, '', 1, '', 0)",
    )
    .bind(name)
    .bind(format!("{name}@mealmate.localhost"))
    .execute(&state.pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn create_recipe(
    state: &TestState,
    author_id: i64,
    title: &str,
    is_public: bool,
) -> anyhow::Result<i64> {
    let (id, _) = mealmate_recipe::Command(state.state.clone())
        .create(
            author_id,
            RecipeInput {
                title: title.to_owned(),
                description: format!("How to cook {title}"),
                category_id: None,
                dietary_tag_ids: vec![],
                prep_time: 5,
                cook_time: 5,
                servings: 2,
                difficulty: Default::default(),
                calories: None,
                is_public,
                ingredients: vec![IngredientInput {
                    name: "Salt".to_owned(),
                    amount: "1 pinch".to_owned(),
                }],
                instructions: vec![],
            },
        )
        .await?;

    Ok(id)
}

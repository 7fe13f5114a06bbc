use std::{path::PathBuf, str::FromStr};

use mealmate_recipe::{IngredientInput, InstructionInput, RecipeInput};
use mealmate_shared::recipe::Difficulty;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub state: mealmate_shared::State,
    pub pool: SqlitePool,
}

impl TestState {
    pub fn command(&self) -> mealmate_recipe::Command {
        mealmate_recipe::Command(self.state.clone())
    }

    pub fn query(&self) -> mealmate_recipe::Query {
        mealmate_recipe::Query(self.state.clone())
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

#[allow(dead_code)]
pub fn recipe_input(title: &str) -> RecipeInput {
    RecipeInput {
        title: title.to_owned(),
        description: format!("How to cook {title}"),
        category_id: None,
        dietary_tag_ids: vec![],
        prep_time: 10,
        cook_time: 20,
        servings: 2,
        difficulty: Difficulty::Easy,
        calories: Some(450),
        is_public: true,
        ingredients: vec![
            IngredientInput {
                name: "Flour".to_owned(),
                amount: "200 g".to_owned(),
            },
            IngredientInput {
                name: "Eggs".to_owned(),
                amount: "2".to_owned(),
            },
        ],
        instructions: vec![
            InstructionInput {
                description: "Mix everything".to_owned(),
            },
            InstructionInput {
                description: "Bake".to_owned(),
            },
        ],
    }
}

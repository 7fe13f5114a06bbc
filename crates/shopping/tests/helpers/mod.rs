use std::{path::PathBuf, str::FromStr};

use mealmate_mealplan::{MealInput, MealPlanInput};
use mealmate_recipe::{IngredientInput, RecipeInput};
use mealmate_shared::mealplan::MealType;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub state: mealmate_shared::State,
    pub pool: SqlitePool,
}

impl TestState {
    pub fn command(&self) -> mealmate_shopping::Command {
        mealmate_shopping::Command(self.state.clone())
    }

    pub fn query(&self) -> mealmate_shopping::Query {
        mealmate_shopping::Query(self.state.clone())
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

/// Creates a public recipe and returns its id and slug.
#[allow(dead_code)]
pub async fn create_recipe(
    state: &TestState,
    author_id: i64,
    title: &str,
    ingredients: &[(&str, &str)],
) -> anyhow::Result<(i64, String)> {
    let recipe = mealmate_recipe::Command(state.state.clone())
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
                is_public: true,
                ingredients: ingredients
                    .iter()
                    .map(|(name, amount)| IngredientInput {
                        name: name.to_string(),
                        amount: amount.to_string(),
                    })
                    .collect(),
                instructions: vec![],
            },
        )
        .await?;

    Ok(recipe)
}

/// Creates a plan starting 2024-01-01 with one meal per `(recipe, type, day)`.
#[allow(dead_code)]
pub async fn create_meal_plan(
    state: &TestState,
    user_id: i64,
    name: &str,
    meals: &[(i64, MealType, u8)],
) -> anyhow::Result<i64> {
    let cmd = mealmate_mealplan::Command(state.state.clone());
    let plan_id = cmd
        .create(
            user_id,
            MealPlanInput {
                name: name.to_owned(),
                description: String::new(),
                start_date: "2024-01-01".to_owned(),
                end_date: None,
                is_active: true,
            },
        )
        .await?;

    for (recipe_id, meal_type, day_of_week) in meals {
        cmd.add_meal(
            user_id,
            plan_id,
            MealInput {
                recipe_id: *recipe_id,
                meal_type: *meal_type,
                day_of_week: *day_of_week,
                servings: 1,
                notes: String::new(),
                is_completed: false,
            },
        )
        .await?;
    }

    Ok(plan_id)
}

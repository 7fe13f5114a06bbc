use std::collections::HashMap;

use mealmate_recipe::{CategoryInput, DietaryTagInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn categories_are_unique_and_sorted() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = state.command();

    for name in ["Soups", "Breakfast & Brunch"] {
        cmd.create_category(CategoryInput {
            name: name.to_owned(),
            description: String::new(),
        })
        .await?;
    }

    let err = cmd
        .create_category(CategoryInput {
            name: " Soups ".to_owned(),
            description: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Category already exists.");

    let categories = state.query().list_categories().await?;
    assert_eq!(
        categories
            .iter()
            .map(|c| c.slug.as_str())
            .collect::<Vec<_>>(),
        vec!["breakfast-brunch", "soups"]
    );

    let err = cmd
        .create_dietary_tag(DietaryTagInput {
            name: "Keto".to_owned(),
            description: String::new(),
            color: "green".to_owned(),
        })
        .await;
    assert!(err.is_err());

    Ok(())
}

#[tokio::test]
async fn ingredients_of_groups_by_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = state.command();

    let (first, _) = cmd.create(john, helpers::recipe_input("Crepes")).await?;
    let mut input = helpers::recipe_input("Omelette");
    input.ingredients.truncate(1);
    input.ingredients[0].name = "Eggs".to_owned();
    let (second, _) = cmd.create(john, input).await?;

    let grouped: HashMap<i64, Vec<_>> = state.query().ingredients_of(&[first, second]).await?;

    assert_eq!(
        grouped[&first]
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Flour", "Eggs"]
    );
    assert_eq!(grouped[&second].len(), 1);
    assert!(state.query().ingredients_of(&[]).await?.is_empty());

    Ok(())
}

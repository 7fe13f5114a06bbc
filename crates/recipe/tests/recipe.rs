use mealmate_recipe::{CategoryInput, DietaryTagInput, RecipeFilter};
use mealmate_shared::{Error, recipe::Difficulty};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn create_assigns_unique_slugs() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = state.command();

    let (_, first) = cmd.create(john, helpers::recipe_input("Banana Bread")).await?;
    let (_, second) = cmd.create(john, helpers::recipe_input("Banana  Bread!")).await?;
    let (_, third) = cmd.create(john, helpers::recipe_input("???")).await?;

    assert_eq!(first, "banana-bread");
    assert_eq!(second, "banana-bread-2");
    assert_eq!(third, "recipe");

    Ok(())
}

#[tokio::test]
async fn create_requires_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;

    let mut input = helpers::recipe_input("Empty");
    input.ingredients.clear();

    let err = state.command().create(john, input).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let mut input = helpers::recipe_input("Long amount");
    input.ingredients[0].amount = "x".repeat(51);

    let err = state.command().create(john, input).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let mut input = helpers::recipe_input("Blank step");
    input.instructions[0].description = String::new();

    let err = state.command().create(john, input).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let mut input = helpers::recipe_input("Unknown tag");
    input.dietary_tag_ids = vec![42];

    let err = state.command().create(john, input).await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown dietary tag");

    Ok(())
}

#[tokio::test]
async fn get_counts_views_and_hides_private_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;

    let mut input = helpers::recipe_input("Secret Sauce");
    input.is_public = false;
    let (_, slug) = state.command().create(john, input).await?;

    let detail = state.query().get(&slug, john).await?;
    assert_eq!(detail.recipe.views, 1);
    assert_eq!(detail.recipe.total_time, 30);
    assert_eq!(detail.recipe.author_name, "john");
    assert_eq!(detail.ingredients.len(), 2);
    assert_eq!(detail.ingredients[0].name, "Flour");
    assert_eq!(
        detail
            .instructions
            .iter()
            .map(|i| i.step_number)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );

    let detail = state.query().get(&slug, john).await?;
    assert_eq!(detail.recipe.views, 2);

    let err = state.query().get(&slug, albert).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn only_author_updates_and_deletes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let cmd = state.command();

    let (_, slug) = cmd.create(john, helpers::recipe_input("Pancakes")).await?;

    let mut input = helpers::recipe_input("Fluffy Pancakes");
    input.difficulty = Difficulty::Hard;
    input.instructions.truncate(1);

    let err = cmd.update(albert, &slug, input.clone()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    cmd.update(john, &slug, input).await?;

    let detail = state.query().get(&slug, john).await?;
    assert_eq!(detail.recipe.title, "Fluffy Pancakes");
    assert_eq!(detail.recipe.slug, slug);
    assert_eq!(detail.recipe.difficulty, Difficulty::Hard);
    assert_eq!(detail.instructions.len(), 1);

    let err = cmd.delete(albert, &slug).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    cmd.delete(john, &slug).await?;
    assert!(state.query().find(&slug, john).await?.is_none());

    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM ingredient")
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

#[tokio::test]
async fn list_applies_filters() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = state.command();

    let dessert = cmd
        .create_category(CategoryInput {
            name: "Desserts".to_owned(),
            description: String::new(),
        })
        .await?;
    let vegan = cmd
        .create_dietary_tag(DietaryTagInput {
            name: "Vegan".to_owned(),
            description: String::new(),
            color: "#00ff00".to_owned(),
        })
        .await?;

    let mut input = helpers::recipe_input("Chocolate Cake");
    input.category_id = Some(dessert.id);
    input.calories = Some(800);
    input.difficulty = Difficulty::Hard;
    cmd.create(john, input).await?;

    let mut input = helpers::recipe_input("Lentil Soup");
    input.dietary_tag_ids = vec![vegan.id];
    input.ingredients[0].name = "Red lentils".to_owned();
    cmd.create(john, input).await?;

    let mut input = helpers::recipe_input("Hidden Stew");
    input.is_public = false;
    cmd.create(john, input).await?;

    let query = state.query();

    let all = query.list(RecipeFilter::default()).await?;
    assert_eq!(
        all.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
        vec!["Lentil Soup", "Chocolate Cake"]
    );

    let found = query
        .list(RecipeFilter {
            search: Some("lentils".to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Lentil Soup");

    let found = query
        .list(RecipeFilter {
            category: Some(dessert.slug.to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category_name.as_deref(), Some("Desserts"));

    let found = query
        .list(RecipeFilter {
            dietary_tag: Some("vegan".to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Lentil Soup");

    let found = query
        .list(RecipeFilter {
            difficulty: Some(Difficulty::Hard),
            max_calories: Some(1000),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 1);

    let found = query
        .list(RecipeFilter {
            max_calories: Some(500),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 1);

    let page = query
        .list(RecipeFilter {
            page: Some(2),
            limit: Some(1),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "Chocolate Cake");

    let first = query
        .list(RecipeFilter {
            page: Some(0),
            limit: Some(1),
            ..Default::default()
        })
        .await?;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, "Lentil Soup");

    assert_eq!(query.list_by_author(john).await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn toggle_favorite() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let cmd = state.command();

    let (_, slug) = cmd.create(john, helpers::recipe_input("Tacos")).await?;

    assert!(cmd.toggle_favorite(albert, &slug).await?);
    let favorites = state.query().list_favorites(albert).await?;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].favorite_count, 1);
    assert!(state.query().get(&slug, albert).await?.is_favorited);

    assert!(!cmd.toggle_favorite(albert, &slug).await?);
    assert!(state.query().list_favorites(albert).await?.is_empty());

    Ok(())
}

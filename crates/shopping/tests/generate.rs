use mealmate_shared::{Error, mealplan::MealType};
use mealmate_shopping::ListTarget;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn generate_counts_repeated_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;

    let (omelette, _) = helpers::create_recipe(
        &state,
        john,
        "Omelette",
        &[("Eggs", "4 large"), ("Butter", "1 tbsp")],
    )
    .await?;
    let (cake, _) = helpers::create_recipe(
        &state,
        john,
        "Cake",
        &[("Flour", "200 g"), ("eggs", "3")],
    )
    .await?;

    let plan_id = helpers::create_meal_plan(
        &state,
        john,
        "January",
        &[
            (cake, MealType::Dinner, 1),
            (omelette, MealType::Breakfast, 0),
        ],
    )
    .await?;

    let (list_id, count) = state
        .command()
        .generate_from_meal_plan(john, plan_id)
        .await?;
    assert_eq!(count, 3);

    let detail = state.query().get(list_id, john).await?;
    assert_eq!(detail.list.name, "Shopping for January");
    assert_eq!(detail.list.meal_plan_id, Some(plan_id));
    assert_eq!(
        detail
            .items
            .iter()
            .map(|i| (i.name.as_str(), i.quantity.as_str()))
            .collect::<Vec<_>>(),
        vec![("Eggs", "4 large (x2)"), ("Butter", "1 tbsp"), ("Flour", "200 g")]
    );
    assert_eq!(detail.sections.len(), 1);
    assert_eq!(detail.sections[0].name, "Other");

    let albert = helpers::create_user(&state, "albert").await?;
    let err = state
        .command()
        .generate_from_meal_plan(albert, plan_id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn adding_a_recipe_twice_merges_quantities() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = state.command();

    let (_, slug) = helpers::create_recipe(
        &state,
        john,
        "Pancakes",
        &[("Milk", "2 cups"), ("Eggs", "2")],
    )
    .await?;

    let (list_id, count) = cmd.add_recipe(john, &slug, ListTarget::New).await?;
    assert_eq!(count, 2);

    let (same_list, _) = cmd
        .add_recipe(john, &slug, ListTarget::Existing(list_id))
        .await?;
    assert_eq!(same_list, list_id);

    let detail = state.query().get(list_id, john).await?;
    assert_eq!(detail.list.name, "Shopping for Pancakes");
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].name, "Milk");
    assert_eq!(detail.items[0].quantity, "2 cups + 2 cups");
    assert_eq!(detail.items[0].notes, "From Pancakes");
    assert_eq!(detail.sections[0].name, "Pancakes");

    let albert = helpers::create_user(&state, "albert").await?;
    let err = cmd
        .add_recipe(albert, &slug, ListTarget::Existing(list_id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = cmd
        .add_recipe(john, "missing", ListTarget::New)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn adding_recipes_merges_names_regardless_of_case() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = state.command();

    let (_, strudel) = helpers::create_recipe(
        &state,
        john,
        "Strudel",
        &[("Äpfel", "3"), ("Milk", "1 l")],
    )
    .await?;
    let (_, kompott) = helpers::create_recipe(
        &state,
        john,
        "Kompott",
        &[("äpfel", "2"), ("milk", "200 ml")],
    )
    .await?;

    let (list_id, _) = cmd.add_recipe(john, &strudel, ListTarget::New).await?;
    cmd.add_recipe(john, &kompott, ListTarget::Existing(list_id))
        .await?;

    let detail = state.query().get(list_id, john).await?;
    let items = detail
        .items
        .iter()
        .map(|item| (item.name.as_str(), item.quantity.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(items, vec![("Äpfel", "3 + 2"), ("Milk", "1 l + 200 ml")]);

    Ok(())
}

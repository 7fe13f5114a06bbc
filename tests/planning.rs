use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

mod helpers;

fn pancakes() -> Value {
    json!({
        "title": "Pancakes",
        "description": "Fluffy breakfast pancakes",
        "prep_time": 10,
        "cook_time": 15,
        "servings": 4,
        "difficulty": "easy",
        "ingredients": [
            {"name": "Flour", "amount": "200 g"},
            {"name": "Milk", "amount": "300 ml"},
        ],
        "instructions": [
            {"description": "Whisk"},
            {"description": "Fry"},
        ],
    })
}

#[tokio::test]
async fn recipe_to_shopping_list() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let john = app.login_as("john").await?;

    let res = app
        .send(Method::POST, "/recipes", Some(&john), Some(pancakes()))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["slug"], "pancakes");

    let res = app
        .send(Method::GET, "/recipes?search=panc", None, None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().map(Vec::len), Some(1));

    let res = app
        .send(Method::GET, "/recipes/pancakes", Some(&john), None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "Pancakes");
    assert_eq!(res.body["views"], 1);
    assert_eq!(res.body["instructions"][1]["step_number"], 2);

    let res = app
        .send(
            Method::POST,
            "/recipes/pancakes/shopping-list",
            Some(&john),
            Some(json!({"shopping_list_id": "new"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["items"], 2);
    let list_id = res.body["shopping_list_id"].as_i64().unwrap();

    let res = app
        .send(
            Method::POST,
            "/recipes/pancakes/shopping-list",
            Some(&john),
            Some(json!({"shopping_list_id": list_id})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["shopping_list_id"], list_id);

    let res = app
        .send(
            Method::POST,
            "/recipes/pancakes/shopping-list",
            Some(&john),
            Some(json!({"shopping_list_id": "abc"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Invalid shopping list 'abc'");

    let res = app
        .send(
            Method::GET,
            &format!("/shopping-lists/{list_id}"),
            Some(&john),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["access"], "owner");
    let flour = res.body["items"]
        .as_array()
        .and_then(|items| items.iter().find(|item| item["name"] == "Flour"))
        .cloned()
        .unwrap();
    assert_eq!(flour["quantity"], "200 g + 200 g");

    Ok(())
}

#[tokio::test]
async fn meal_plan_generates_shopping_list() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let john = app.login_as("john").await?;
    let bob = app.login_as("bob").await?;

    let res = app
        .send(Method::POST, "/recipes", Some(&john), Some(pancakes()))
        .await?;
    let recipe_id = res.body["id"].as_i64().unwrap();

    let res = app
        .send(
            Method::POST,
            "/meal-plans",
            Some(&john),
            Some(json!({"name": "Week 1", "start_date": "2024-01-01"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let plan_id = res.body["id"].as_i64().unwrap();

    let res = app
        .send(
            Method::POST,
            &format!("/meal-plans/{plan_id}/meals"),
            Some(&john),
            Some(json!({"recipe_id": recipe_id, "meal_type": "dinner", "day_of_week": 2})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app
        .send(
            Method::GET,
            &format!("/meal-plans/{plan_id}"),
            Some(&john),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["end_date"], "2024-01-07");
    assert_eq!(res.body["days"][2]["dinner"]["recipe_slug"], "pancakes");
    assert_eq!(res.body["days"][2]["date"], "2024-01-03");

    let res = app
        .send(
            Method::GET,
            &format!("/meal-plans/{plan_id}"),
            Some(&bob),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .send(
            Method::POST,
            &format!("/meal-plans/{plan_id}/shopping-list"),
            Some(&john),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["items"], 2);

    let res = app
        .send(Method::GET, "/shopping-lists", Some(&john), None)
        .await?;
    assert_eq!(res.body["owned"][0]["name"], "Shopping for Week 1");
    assert_eq!(res.body["owned"][0]["meal_plan_id"], plan_id);

    Ok(())
}

#[tokio::test]
async fn sharee_can_edit_items_but_not_the_list() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let john = app.login_as("john").await?;
    let bob = app.login_as("bob").await?;

    let res = app
        .send(
            Method::POST,
            "/shopping-lists",
            Some(&john),
            Some(json!({"name": "Weekly"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let list = format!("/shopping-lists/{}", res.body["id"].as_i64().unwrap());

    let res = app
        .send(Method::GET, &list, Some(&bob), None)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .send(
            Method::POST,
            &format!("{list}/share"),
            Some(&john),
            Some(json!({"username": "bob"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .send(Method::GET, "/shopping-lists", Some(&bob), None)
        .await?;
    assert_eq!(res.body["shared"].as_array().map(Vec::len), Some(1));

    let res = app
        .send(Method::GET, &list, Some(&bob), None)
        .await?;
    assert_eq!(res.body["access"], "shared");

    let res = app
        .send(Method::DELETE, &list, Some(&bob), None)
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["message"], "Only the owner can delete this list");

    let res = app
        .send(
            Method::POST,
            &format!("{list}/items"),
            Some(&bob),
            Some(json!({"name": "Milk", "quantity": "1 l", "category": "dairy"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let item_id = res.body["id"].as_i64().unwrap();

    let res = app
        .send(
            Method::POST,
            &format!("/shopping-items/{item_id}/toggle"),
            Some(&bob),
            None,
        )
        .await?;
    assert_eq!(res.body["is_purchased"], true);

    let res = app
        .send(Method::GET, &list, Some(&john), None)
        .await?;
    assert_eq!(res.body["completion_percentage"], 100);
    assert_eq!(res.body["sections"][0]["name"], "Dairy & Eggs");

    let res = app
        .send(Method::POST, &format!("{list}/leave"), Some(&bob), None)
        .await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app
        .send(Method::GET, &list, Some(&bob), None)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    Ok(())
}

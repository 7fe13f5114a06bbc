mod category;
mod dietary_tag;
mod email_otp;
mod favorite;
mod ingredient;
mod instruction;
mod meal;
mod meal_plan;
mod recipe;
mod recipe_dietary_tag;
mod review;
mod shopping_list;
mod shopping_list_item;
mod shopping_list_share;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealmate",
    "m0_1",
    vec_box![],
    vec_box![
        user::CreateTable,
        email_otp::CreateTable,
        email_otp::CreateIdx1,
        category::CreateTable,
        dietary_tag::CreateTable,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        recipe_dietary_tag::CreateTable,
        ingredient::CreateTable,
        ingredient::CreateIdx1,
        instruction::CreateTable,
        instruction::CreateIdx1,
        favorite::CreateTable,
        review::CreateTable,
        review::CreateIdx1,
        meal_plan::CreateTable,
        meal_plan::CreateIdx1,
        meal::CreateTable,
        meal::CreateIdx1,
        shopping_list::CreateTable,
        shopping_list_share::CreateTable,
        shopping_list_item::CreateTable,
        shopping_list_item::CreateIdx1,
    ]
);

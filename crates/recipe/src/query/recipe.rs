use mealmate_db::table::{
    Category, DietaryTag, Favorite, Ingredient, Instruction, Recipe, RecipeDietaryTag, Review,
    User,
};
use mealmate_shared::recipe::Difficulty;
use sea_query::{Alias, Cond, Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use super::IngredientRow;
use crate::DietaryTagRow;

pub const DEFAULT_PAGE_SIZE: u64 = 12;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeSummary {
    pub id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub prep_time: i64,
    pub cook_time: i64,
    pub total_time: i64,
    pub servings: i64,
    pub difficulty: Difficulty,
    pub calories: Option<i64>,
    pub is_public: bool,
    pub views: i64,
    pub favorite_count: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InstructionRow {
    pub step_number: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub rating: i64,
    pub comment: String,
    pub reply: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: RecipeSummary,
    pub ingredients: Vec<IngredientRow>,
    pub instructions: Vec<InstructionRow>,
    pub dietary_tags: Vec<DietaryTagRow>,
    pub reviews: Vec<ReviewRow>,
    pub is_favorited: bool,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub dietary_tag: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub max_calories: Option<u32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn select_summary() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::AuthorId),
            (Recipe::Table, Recipe::CategoryId),
            (Recipe::Table, Recipe::Title),
            (Recipe::Table, Recipe::Slug),
            (Recipe::Table, Recipe::Description),
            (Recipe::Table, Recipe::PrepTime),
            (Recipe::Table, Recipe::CookTime),
            (Recipe::Table, Recipe::Servings),
            (Recipe::Table, Recipe::Difficulty),
            (Recipe::Table, Recipe::Calories),
            (Recipe::Table, Recipe::IsPublic),
            (Recipe::Table, Recipe::Views),
            (Recipe::Table, Recipe::CreatedAt),
            (Recipe::Table, Recipe::UpdatedAt),
        ])
        .expr_as(
            Expr::col((User::Table, User::Username)),
            Alias::new("author_name"),
        )
        .expr_as(
            Expr::col((Category::Table, Category::Name)),
            Alias::new("category_name"),
        )
        .expr_as(
            Expr::col((Category::Table, Category::Slug)),
            Alias::new("category_slug"),
        )
        .expr_as(
            Expr::cust("recipe.prep_time + recipe.cook_time"),
            Alias::new("total_time"),
        )
        .expr_as(
            Expr::cust("(SELECT COUNT(*) FROM favorite WHERE favorite.recipe_id = recipe.id)"),
            Alias::new("favorite_count"),
        )
        .expr_as(
            Expr::cust("(SELECT COUNT(*) FROM review WHERE review.recipe_id = recipe.id)"),
            Alias::new("review_count"),
        )
        .expr_as(
            Expr::cust(
                "(SELECT ROUND(AVG(review.rating), 1) FROM review WHERE review.recipe_id = recipe.id)",
            ),
            Alias::new("average_rating"),
        )
        .from(Recipe::Table)
        .inner_join(
            User::Table,
            Expr::col((User::Table, User::Id)).equals((Recipe::Table, Recipe::AuthorId)),
        )
        .left_join(
            Category::Table,
            Expr::col((Category::Table, Category::Id)).equals((Recipe::Table, Recipe::CategoryId)),
        )
        .to_owned()
}

fn visible_to(user_id: i64) -> Cond {
    Cond::any()
        .add(Expr::col((Recipe::Table, Recipe::IsPublic)).eq(true))
        .add(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(user_id))
}

impl super::Query {
    async fn fetch_summaries(
        &self,
        statement: SelectStatement,
    ) -> mealmate_shared::Result<Vec<RecipeSummary>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeSummary, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    /// Recipe by slug when visible to `viewer`, without counting a view.
    pub async fn find(
        &self,
        slug: &str,
        viewer: i64,
    ) -> mealmate_shared::Result<Option<RecipeSummary>> {
        let statement = select_summary()
            .and_where(Expr::col((Recipe::Table, Recipe::Slug)).eq(slug))
            .cond_where(visible_to(viewer))
            .limit(1)
            .to_owned();

        Ok(self.fetch_summaries(statement).await?.into_iter().next())
    }

    /// Full recipe page. Each call counts as one view.
    pub async fn get(&self, slug: &str, viewer: i64) -> mealmate_shared::Result<RecipeDetail> {
        let Some(recipe) = self.find(slug, viewer).await? else {
            mealmate_shared::not_found!("Recipe not found");
        };

        let (sql, values) = sea_query::Query::update()
            .table(Recipe::Table)
            .value(Recipe::Views, Expr::col(Recipe::Views).add(1))
            .and_where(Expr::col(Recipe::Id).eq(recipe.id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        let mut recipe = recipe;
        recipe.views += 1;

        let ingredients = self
            .ingredients_of(&[recipe.id])
            .await?
            .remove(&recipe.id)
            .unwrap_or_default();

        let (sql, values) = sea_query::Query::select()
            .columns([Instruction::StepNumber, Instruction::Description])
            .from(Instruction::Table)
            .and_where(Expr::col(Instruction::RecipeId).eq(recipe.id))
            .order_by(Instruction::StepNumber, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let instructions = sqlx::query_as_with::<_, InstructionRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let (sql, values) = sea_query::Query::select()
            .columns([
                (DietaryTag::Table, DietaryTag::Id),
                (DietaryTag::Table, DietaryTag::Name),
                (DietaryTag::Table, DietaryTag::Slug),
                (DietaryTag::Table, DietaryTag::Description),
                (DietaryTag::Table, DietaryTag::Color),
            ])
            .from(DietaryTag::Table)
            .inner_join(
                RecipeDietaryTag::Table,
                Expr::col((RecipeDietaryTag::Table, RecipeDietaryTag::DietaryTagId))
                    .equals((DietaryTag::Table, DietaryTag::Id)),
            )
            .and_where(Expr::col((RecipeDietaryTag::Table, RecipeDietaryTag::RecipeId)).eq(recipe.id))
            .order_by((DietaryTag::Table, DietaryTag::Name), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let dietary_tags = sqlx::query_as_with::<_, DietaryTagRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let (sql, values) = sea_query::Query::select()
            .columns([
                (Review::Table, Review::Id),
                (Review::Table, Review::UserId),
                (Review::Table, Review::Rating),
                (Review::Table, Review::Comment),
                (Review::Table, Review::Reply),
                (Review::Table, Review::CreatedAt),
                (Review::Table, Review::UpdatedAt),
            ])
            .column((User::Table, User::Username))
            .from(Review::Table)
            .inner_join(
                User::Table,
                Expr::col((User::Table, User::Id)).equals((Review::Table, Review::UserId)),
            )
            .and_where(Expr::col((Review::Table, Review::RecipeId)).eq(recipe.id))
            .order_by((Review::Table, Review::CreatedAt), Order::Desc)
            .order_by((Review::Table, Review::Id), Order::Desc)
            .build_sqlx(SqliteQueryBuilder);

        let reviews = sqlx::query_as_with::<_, ReviewRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let (sql, values) = sea_query::Query::select()
            .column(Favorite::RecipeId)
            .from(Favorite::Table)
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe.id))
            .and_where(Expr::col(Favorite::UserId).eq(viewer))
            .build_sqlx(SqliteQueryBuilder);

        let is_favorited = sqlx::query_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some();

        Ok(RecipeDetail {
            recipe,
            ingredients,
            instructions,
            dietary_tags,
            reviews,
            is_favorited,
        })
    }

    /// Public recipes, newest first.
    pub async fn list(&self, filter: RecipeFilter) -> mealmate_shared::Result<Vec<RecipeSummary>> {
        let mut statement = select_summary()
            .and_where(Expr::col((Recipe::Table, Recipe::IsPublic)).eq(true))
            .to_owned();

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(search));
            let ingredient_match = sea_query::Query::select()
                .expr(Expr::val(1))
                .from(Ingredient::Table)
                .and_where(
                    Expr::col((Ingredient::Table, Ingredient::RecipeId))
                        .equals((Recipe::Table, Recipe::Id)),
                )
                .and_where(Expr::cust_with_values(
                    "ingredient.name LIKE ? ESCAPE '\\'",
                    [pattern.to_owned()],
                ))
                .to_owned();

            statement.cond_where(
                Cond::any()
                    .add(Expr::cust_with_values(
                        "recipe.title LIKE ? ESCAPE '\\'",
                        [pattern.to_owned()],
                    ))
                    .add(Expr::cust_with_values(
                        "recipe.description LIKE ? ESCAPE '\\'",
                        [pattern],
                    ))
                    .add(Expr::exists(ingredient_match)),
            );
        }

        if let Some(category) = filter.category.filter(|s| !s.is_empty()) {
            statement.and_where(Expr::col((Category::Table, Category::Slug)).eq(category));
        }

        if let Some(tag) = filter.dietary_tag.filter(|s| !s.is_empty()) {
            let tag_match = sea_query::Query::select()
                .expr(Expr::val(1))
                .from(RecipeDietaryTag::Table)
                .inner_join(
                    DietaryTag::Table,
                    Expr::col((DietaryTag::Table, DietaryTag::Id))
                        .equals((RecipeDietaryTag::Table, RecipeDietaryTag::DietaryTagId)),
                )
                .and_where(
                    Expr::col((RecipeDietaryTag::Table, RecipeDietaryTag::RecipeId))
                        .equals((Recipe::Table, Recipe::Id)),
                )
                .and_where(Expr::col((DietaryTag::Table, DietaryTag::Slug)).eq(tag))
                .to_owned();

            statement.and_where(Expr::exists(tag_match));
        }

        if let Some(difficulty) = filter.difficulty {
            statement
                .and_where(Expr::col((Recipe::Table, Recipe::Difficulty)).eq(difficulty.to_string()));
        }

        if let Some(max_calories) = filter.max_calories {
            statement.and_where(Expr::col((Recipe::Table, Recipe::Calories)).lte(max_calories));
        }

        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
        let page = Ord::max(filter.page.unwrap_or(1), 1);

        statement
            .order_by((Recipe::Table, Recipe::CreatedAt), Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), Order::Desc)
            .limit(limit)
            .offset((page - 1) * limit);

        self.fetch_summaries(statement).await
    }

    pub async fn list_by_author(&self, author_id: i64) -> mealmate_shared::Result<Vec<RecipeSummary>> {
        let statement = select_summary()
            .and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author_id))
            .order_by((Recipe::Table, Recipe::CreatedAt), Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), Order::Desc)
            .to_owned();

        self.fetch_summaries(statement).await
    }

    /// Favorites still visible to the user, most recently favorited first.
    pub async fn list_favorites(&self, user_id: i64) -> mealmate_shared::Result<Vec<RecipeSummary>> {
        let statement = select_summary()
            .inner_join(
                Favorite::Table,
                Expr::col((Favorite::Table, Favorite::RecipeId)).equals((Recipe::Table, Recipe::Id)),
            )
            .and_where(Expr::col((Favorite::Table, Favorite::UserId)).eq(user_id))
            .cond_where(visible_to(user_id))
            .order_by((Favorite::Table, Favorite::CreatedAt), Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), Order::Desc)
            .to_owned();

        self.fetch_summaries(statement).await
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

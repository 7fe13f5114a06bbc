use std::collections::HashSet;

use mealmate_db::table::{Category, DietaryTag, Ingredient, Instruction, Recipe, RecipeDietaryTag};
use mealmate_shared::recipe::Difficulty;
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use validator::Validate;

use crate::slug::{self, slugify};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 50))]
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InstructionInput {
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub dietary_tag_ids: Vec<i64>,
    pub prep_time: u32,
    pub cook_time: u32,
    #[validate(range(min = 1))]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    #[validate(
        length(min = 1, message = "At least one ingredient is required"),
        nested
    )]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    #[validate(nested)]
    pub instructions: Vec<InstructionInput>,
}

fn default_is_public() -> bool {
    true
}

impl RecipeInput {
    pub(crate) fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.description = self.description.trim().to_owned();
        for ingredient in self.ingredients.iter_mut() {
            ingredient.name = ingredient.name.trim().to_owned();
            ingredient.amount = ingredient.amount.trim().to_owned();
        }
        for instruction in self.instructions.iter_mut() {
            instruction.description = instruction.description.trim().to_owned();
        }

        self
    }
}

impl super::Command {
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(
        &self,
        author_id: i64,
        input: RecipeInput,
    ) -> mealmate_shared::Result<(i64, String)> {
        let input = input.normalize();
        input.validate()?;
        self.check_references(&input).await?;

        let base = match slugify(&input.title) {
            base if base.is_empty() => "recipe".to_owned(),
            base => base,
        };
        let slug = slug::unique(&self.read_db, Recipe::Table, Recipe::Slug, &base).await?;
        let now = mealmate_shared::now();

        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::CategoryId,
                Recipe::Title,
                Recipe::Slug,
                Recipe::Description,
                Recipe::PrepTime,
                Recipe::CookTime,
                Recipe::Servings,
                Recipe::Difficulty,
                Recipe::Calories,
                Recipe::IsPublic,
                Recipe::CreatedAt,
                Recipe::UpdatedAt,
            ])
            .values_panic([
                author_id.into(),
                input.category_id.into(),
                input.title.to_owned().into(),
                slug.to_owned().into(),
                input.description.to_owned().into(),
                input.prep_time.into(),
                input.cook_time.into(),
                input.servings.into(),
                input.difficulty.to_string().into(),
                input.calories.into(),
                input.is_public.into(),
                now.into(),
                now.into(),
            ])
            .to_owned();

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        replace_children(&mut tx, id, &input).await?;

        tx.commit().await?;

        tracing::info!(recipe_id = id, slug = %slug, "Recipe created");

        Ok((id, slug))
    }

    pub(crate) async fn check_references(&self, input: &RecipeInput) -> mealmate_shared::Result<()> {
        if let Some(category_id) = input.category_id {
            let (sql, values) = Query::select()
                .column(Category::Id)
                .from(Category::Table)
                .and_where(Expr::col(Category::Id).eq(category_id))
                .build_sqlx(SqliteQueryBuilder);

            if sqlx::query_with(&sql, values)
                .fetch_optional(&self.read_db)
                .await?
                .is_none()
            {
                mealmate_shared::user!("Unknown category");
            }
        }

        let tag_ids = input.dietary_tag_ids.iter().copied().collect::<HashSet<_>>();
        if !tag_ids.is_empty() {
            let (sql, values) = Query::select()
                .expr(Func::count(Expr::col(DietaryTag::Id)))
                .from(DietaryTag::Table)
                .and_where(Expr::col(DietaryTag::Id).is_in(tag_ids.iter().copied()))
                .build_sqlx(SqliteQueryBuilder);

            let (found,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
                .fetch_one(&self.read_db)
                .await?;

            if usize::try_from(found).unwrap_or_default() != tag_ids.len() {
                mealmate_shared::user!("Unknown dietary tag");
            }
        }

        Ok(())
    }
}

/// Replaces ingredients, instructions and dietary tags of a recipe.
pub(crate) async fn replace_children(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    input: &RecipeInput,
) -> mealmate_shared::Result<()> {
    let deletes = [
        Query::delete()
            .from_table(Ingredient::Table)
            .and_where(Expr::col(Ingredient::RecipeId).eq(recipe_id))
            .to_owned(),
        Query::delete()
            .from_table(Instruction::Table)
            .and_where(Expr::col(Instruction::RecipeId).eq(recipe_id))
            .to_owned(),
        Query::delete()
            .from_table(RecipeDietaryTag::Table)
            .and_where(Expr::col(RecipeDietaryTag::RecipeId).eq(recipe_id))
            .to_owned(),
    ];

    for statement in deletes {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    let mut statement = Query::insert()
        .into_table(Ingredient::Table)
        .columns([
            Ingredient::RecipeId,
            Ingredient::Name,
            Ingredient::Amount,
            Ingredient::Position,
        ])
        .to_owned();

    for (position, ingredient) in input.ingredients.iter().enumerate() {
        statement.values_panic([
            recipe_id.into(),
            ingredient.name.to_owned().into(),
            ingredient.amount.to_owned().into(),
            (position as i64).into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if !input.instructions.is_empty() {
        let mut statement = Query::insert()
            .into_table(Instruction::Table)
            .columns([
                Instruction::RecipeId,
                Instruction::StepNumber,
                Instruction::Description,
            ])
            .to_owned();

        for (index, instruction) in input.instructions.iter().enumerate() {
            statement.values_panic([
                recipe_id.into(),
                (index as i64 + 1).into(),
                instruction.description.to_owned().into(),
            ]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    let tag_ids = input
        .dietary_tag_ids
        .iter()
        .copied()
        .collect::<HashSet<_>>();

    if !tag_ids.is_empty() {
        let mut statement = Query::insert()
            .into_table(RecipeDietaryTag::Table)
            .columns([RecipeDietaryTag::RecipeId, RecipeDietaryTag::DietaryTagId])
            .to_owned();

        for tag_id in tag_ids {
            statement.values_panic([recipe_id.into(), tag_id.into()]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    Ok(())
}

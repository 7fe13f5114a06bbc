//! Categories and dietary tags.

use std::sync::LazyLock;

use mealmate_db::table::{Category, DietaryTag};
use regex::Regex;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::slug::{self, slugify};

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DietaryTagRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DietaryTagInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(regex(path = *RE_HEX_COLOR, message = "Color must be a hex value like #28a745"))]
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#28a745".to_owned()
}

impl crate::Command {
    pub async fn create_category(&self, input: CategoryInput) -> mealmate_shared::Result<CategoryRow> {
        input.validate()?;
        let name = input.name.trim().to_owned();

        let (sql, values) = Query::select()
            .column(Category::Id)
            .from(Category::Table)
            .and_where(Expr::col(Category::Name).eq(name.to_owned()))
            .build_sqlx(SqliteQueryBuilder);

        if sqlx::query_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            mealmate_shared::user!("Category already exists.");
        }

        let base = match slugify(&name) {
            base if base.is_empty() => "category".to_owned(),
            base => base,
        };
        let slug = slug::unique(&self.read_db, Category::Table, Category::Slug, &base).await?;
        let description = input.description.trim().to_owned();

        let (sql, values) = Query::insert()
            .into_table(Category::Table)
            .columns([
                Category::Name,
                Category::Slug,
                Category::Description,
                Category::CreatedAt,
            ])
            .values_panic([
                name.to_owned().into(),
                slug.to_owned().into(),
                description.to_owned().into(),
                mealmate_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        Ok(CategoryRow {
            id,
            name,
            slug,
            description,
        })
    }

    pub async fn create_dietary_tag(
        &self,
        input: DietaryTagInput,
    ) -> mealmate_shared::Result<DietaryTagRow> {
        input.validate()?;
        let name = input.name.trim().to_owned();

        let (sql, values) = Query::select()
            .column(DietaryTag::Id)
            .from(DietaryTag::Table)
            .and_where(Expr::col(DietaryTag::Name).eq(name.to_owned()))
            .build_sqlx(SqliteQueryBuilder);

        if sqlx::query_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            mealmate_shared::user!("Dietary tag already exists.");
        }

        let base = match slugify(&name) {
            base if base.is_empty() => "tag".to_owned(),
            base => base,
        };
        let slug = slug::unique(&self.read_db, DietaryTag::Table, DietaryTag::Slug, &base).await?;
        let description = input.description.trim().to_owned();

        let (sql, values) = Query::insert()
            .into_table(DietaryTag::Table)
            .columns([
                DietaryTag::Name,
                DietaryTag::Slug,
                DietaryTag::Description,
                DietaryTag::Color,
                DietaryTag::CreatedAt,
            ])
            .values_panic([
                name.to_owned().into(),
                slug.to_owned().into(),
                description.to_owned().into(),
                input.color.to_owned().into(),
                mealmate_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        Ok(DietaryTagRow {
            id,
            name,
            slug,
            description,
            color: input.color,
        })
    }
}

impl crate::Query {
    pub async fn list_categories(&self) -> mealmate_shared::Result<Vec<CategoryRow>> {
        let (sql, values) = Query::select()
            .columns([
                Category::Id,
                Category::Name,
                Category::Slug,
                Category::Description,
            ])
            .from(Category::Table)
            .order_by(Category::Name, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CategoryRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn list_dietary_tags(&self) -> mealmate_shared::Result<Vec<DietaryTagRow>> {
        let (sql, values) = Query::select()
            .columns([
                DietaryTag::Id,
                DietaryTag::Name,
                DietaryTag::Slug,
                DietaryTag::Description,
                DietaryTag::Color,
            ])
            .from(DietaryTag::Table)
            .order_by(DietaryTag::Name, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, DietaryTagRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}

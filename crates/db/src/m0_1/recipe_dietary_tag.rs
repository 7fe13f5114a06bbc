use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{DietaryTag, Recipe, RecipeDietaryTag};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeDietaryTag::Table)
        .col(
            ColumnDef::new(RecipeDietaryTag::RecipeId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(RecipeDietaryTag::DietaryTagId)
                .integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(RecipeDietaryTag::RecipeId)
                .col(RecipeDietaryTag::DietaryTagId),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeDietaryTag::Table, RecipeDietaryTag::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeDietaryTag::Table, RecipeDietaryTag::DietaryTagId)
                .to(DietaryTag::Table, DietaryTag::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeDietaryTag::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

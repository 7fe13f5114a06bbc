use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::DietaryTag;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(DietaryTag::Table)
        .col(
            ColumnDef::new(DietaryTag::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(DietaryTag::Name)
                .string()
                .not_null()
                .string_len(50)
                .unique_key(),
        )
        .col(
            ColumnDef::new(DietaryTag::Slug)
                .string()
                .not_null()
                .string_len(50)
                .unique_key(),
        )
        .col(
            ColumnDef::new(DietaryTag::Description)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(DietaryTag::Color)
                .string()
                .not_null()
                .string_len(7)
                .default("#28a745"),
        )
        .col(ColumnDef::new(DietaryTag::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(DietaryTag::Table).to_owned()
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

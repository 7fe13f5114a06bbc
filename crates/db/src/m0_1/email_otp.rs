use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{EmailOtp, User};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(EmailOtp::Table)
        .col(
            ColumnDef::new(EmailOtp::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(EmailOtp::UserId).integer().null())
        .col(
            ColumnDef::new(EmailOtp::Email)
                .string()
                .not_null()
                .string_len(254),
        )
        .col(
            ColumnDef::new(EmailOtp::Code)
                .string()
                .not_null()
                .string_len(6),
        )
        .col(
            ColumnDef::new(EmailOtp::IsVerified)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(EmailOtp::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(EmailOtp::ExpiresAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(EmailOtp::Table, EmailOtp::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(EmailOtp::Table).to_owned()
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

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_email_otp_email")
        .table(EmailOtp::Table)
        .col(EmailOtp::Email)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_email_otp_email")
        .table(EmailOtp::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

use mealmate_db::table::User;
use sea_query::{Cond, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteExecutor, prelude::FromRow};

#[derive(FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub email_verified: bool,
    pub bio: String,
    pub created_at: i64,
}

pub enum FindType {
    Id(i64),
    Username(String),
    Email(String),
    /// Matches either the email or the username.
    Login(String),
}

pub(crate) async fn find<'e>(
    executor: impl SqliteExecutor<'e>,
    arg_type: FindType,
) -> mealmate_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Username,
            User::Email,
            User::Password,
            User::EmailVerified,
            User::Bio,
            User::CreatedAt,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
        FindType::Login(value) => statement.cond_where(
            Cond::any()
                .add(Expr::col(User::Email).eq(value.to_owned()))
                .add(Expr::col(User::Username).eq(value)),
        ),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub struct CreateInput {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub email_verified: bool,
}

pub(crate) async fn create<'e>(
    executor: impl SqliteExecutor<'e>,
    input: CreateInput,
) -> mealmate_shared::Result<i64> {
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Username,
            User::Email,
            User::Password,
            User::EmailVerified,
            User::CreatedAt,
        ])
        .values_panic([
            input.username.into(),
            input.email.into(),
            input.password_hash.into(),
            input.email_verified.into(),
            mealmate_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn set_email_verified<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> mealmate_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .value(User::EmailVerified, true)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

pub(crate) async fn update_bio<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    bio: String,
) -> mealmate_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .value(User::Bio, bio)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

pub(crate) async fn delete<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> mealmate_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.rows_affected())
}

pub async fn is_username_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    username: impl Into<String>,
) -> mealmate_shared::Result<bool> {
    let statement = Query::select()
        .column(User::Id)
        .from(User::Table)
        .and_where(Expr::col(User::Username).eq(username.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_optional(executor)
        .await?;

    Ok(row.is_some())
}

pub async fn is_email_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    email: impl Into<String>,
) -> mealmate_shared::Result<bool> {
    let statement = Query::select()
        .column(User::Id)
        .from(User::Table)
        .and_where(Expr::col(User::Email).eq(email.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_optional(executor)
        .await?;

    Ok(row.is_some())
}

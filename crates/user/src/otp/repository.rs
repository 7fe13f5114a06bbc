use mealmate_db::table::EmailOtp;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteExecutor;

use super::{OTP_TTL_SECS, Otp};

pub(crate) async fn create<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: Option<i64>,
    email: &str,
    code: &str,
    now: i64,
) -> mealmate_shared::Result<i64> {
    let statement = Query::insert()
        .into_table(EmailOtp::Table)
        .columns([
            EmailOtp::UserId,
            EmailOtp::Email,
            EmailOtp::Code,
            EmailOtp::CreatedAt,
            EmailOtp::ExpiresAt,
        ])
        .values_panic([
            user_id.into(),
            email.into(),
            code.into(),
            now.into(),
            (now + OTP_TTL_SECS).into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn find<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> mealmate_shared::Result<Option<Otp>> {
    let statement = Query::select()
        .columns([
            EmailOtp::Id,
            EmailOtp::UserId,
            EmailOtp::Email,
            EmailOtp::Code,
            EmailOtp::IsVerified,
            EmailOtp::CreatedAt,
            EmailOtp::ExpiresAt,
        ])
        .from(EmailOtp::Table)
        .and_where(Expr::col(EmailOtp::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Otp, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub(crate) async fn delete<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> mealmate_shared::Result<()> {
    let statement = Query::delete()
        .from_table(EmailOtp::Table)
        .and_where(Expr::col(EmailOtp::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

/// Flags the passcode as consumed. Returns false when it already was.
pub(crate) async fn mark_verified<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> mealmate_shared::Result<bool> {
    let statement = Query::update()
        .table(EmailOtp::Table)
        .value(EmailOtp::IsVerified, true)
        .and_where(Expr::col(EmailOtp::Id).eq(id))
        .and_where(Expr::col(EmailOtp::IsVerified).eq(false))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(result.rows_affected() == 1)
}

pub(crate) async fn set_user<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    user_id: i64,
) -> mealmate_shared::Result<()> {
    let statement = Query::update()
        .table(EmailOtp::Table)
        .value(EmailOtp::UserId, user_id)
        .and_where(Expr::col(EmailOtp::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

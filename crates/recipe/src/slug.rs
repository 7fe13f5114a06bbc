use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

const MAX_SLUG_LEN: usize = 200;

/// Lowercase ASCII alphanumerics, every other run of characters becomes a
/// single `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);

    slug.trim_end_matches('-').to_owned()
}

/// First of `base`, `base-2`, `base-3`, ... not yet used by a row of `table`.
pub(crate) async fn unique<T>(
    pool: &SqlitePool,
    table: T,
    column: T,
    base: &str,
) -> mealmate_shared::Result<String>
where
    T: sea_query::Iden + Clone + 'static,
{
    let mut candidate = base.to_owned();
    let mut suffix = 2;

    loop {
        let (sql, values) = sea_query::Query::select()
            .expr(Expr::val(1))
            .from(table.clone())
            .and_where(Expr::col(column.clone()).eq(candidate.to_owned()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let taken = sqlx::query_with(&sql, values)
            .fetch_optional(pool)
            .await?
            .is_some();

        if !taken {
            return Ok(candidate);
        }

        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
}

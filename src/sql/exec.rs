//! Run a `QueryBuf` against PostgreSQL, binding params positionally.

use crate::error::AppError;
use crate::sql::QueryBuf;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

pub async fn fetch_all<T>(pool: &PgPool, q: &QueryBuf) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(pool).await?)
}

pub async fn fetch_optional<T>(pool: &PgPool, q: &QueryBuf) -> Result<Option<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_optional(pool).await?)
}

/// PostgreSQL `unique_violation`.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// PostgreSQL `foreign_key_violation`.
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

//! Database bootstrap: create the database and tables if they do not exist.

use crate::error::{AppError, ConfigError};
use crate::sql::quoted;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// DDL in dependency order. Every statement is idempotent.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
        name TEXT UNIQUE NOT NULL,
        num_employees INTEGER CHECK (num_employees >= 0),
        description TEXT NOT NULL,
        logo_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        salary INTEGER CHECK (salary >= 0),
        equity NUMERIC CHECK (equity <= 1.0),
        company_handle VARCHAR(25) NOT NULL REFERENCES companies ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username VARCHAR(25) PRIMARY KEY,
        password TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL CHECK (position('@' IN email) > 1),
        is_admin BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS applications (
        username VARCHAR(25) REFERENCES users ON DELETE CASCADE,
        job_id INTEGER REFERENCES jobs ON DELETE CASCADE,
        PRIMARY KEY (username, job_id)
    )
    "#,
];

pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = TABLES.len(), "tables ready");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_opts, db_name) = bootstrap_options(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin_opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// Options for the server's `postgres` database, plus the target database name
/// (`None` when the URL names no database or names `postgres` itself).
fn bootstrap_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::InvalidSetting {
        name: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

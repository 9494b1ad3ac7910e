//! User persistence, authentication, and job applications.

use crate::auth::PasswordHasher;
use crate::config::USER_COLUMNS;
use crate::error::AppError;
use crate::model::{NewUser, StoredCredentials, User, UserDetail, UserPatch};
use crate::sql::exec::{fetch_optional, is_unique_violation};
use crate::sql::{sql_for_partial_update, update_statement};
use sqlx::PgPool;

const COLUMNS: &str = "username, first_name, last_name, email, is_admin";

pub struct UserService;

impl UserService {
    /// Check a username/password pair. Unknown user and wrong password are indistinguishable.
    pub async fn authenticate(
        pool: &PgPool,
        hasher: &PasswordHasher,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let sql = format!("SELECT {}, password FROM users WHERE username = $1", COLUMNS);
        tracing::debug!(sql = %sql, username = %username, "query");
        let stored = sqlx::query_as::<_, StoredCredentials>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?;
        if let Some(stored) = stored {
            if hasher.verify(password.to_string(), stored.password).await? {
                return Ok(stored.user);
            }
        }
        tracing::info!(username = %username, "login rejected");
        Err(AppError::Unauthorized)
    }

    /// Insert a user with a freshly hashed password. A taken username is a bad request.
    pub async fn register(pool: &PgPool, hasher: &PasswordHasher, new: NewUser) -> Result<User, AppError> {
        let duplicate = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(&new.username)
            .fetch_optional(pool)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::InvalidRequest(format!("Duplicate username: {}", new.username)));
        }
        let hashed = hasher.hash(new.password).await?;
        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, username = %new.username, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new.username)
            .bind(&hashed)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.email)
            .bind(new.is_admin)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::InvalidRequest(format!("Duplicate username: {}", new.username))
                } else {
                    AppError::Db(e)
                }
            })?;
        tracing::info!(username = %user.username, is_admin = user.is_admin, "user registered");
        Ok(user)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY username", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?)
    }

    /// One user with the ids of jobs applied to.
    pub async fn get(pool: &PgPool, username: &str) -> Result<UserDetail, AppError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", COLUMNS);
        tracing::debug!(sql = %sql, username = %username, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user: {}", username)))?;
        let jobs = sqlx::query_scalar::<_, i32>("SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id")
            .bind(username)
            .fetch_all(pool)
            .await?;
        Ok(UserDetail { user, jobs })
    }

    /// Partial update; a new password is hashed before it reaches the field set.
    pub async fn update(
        pool: &PgPool,
        hasher: &PasswordHasher,
        username: &str,
        mut patch: UserPatch,
    ) -> Result<User, AppError> {
        if let Some(password) = patch.password.take() {
            patch.password = Some(hasher.hash(password).await?);
        }
        let set = sql_for_partial_update(&patch.into_field_set(), &USER_COLUMNS)?;
        let q = update_statement("users", set, "username", username, COLUMNS);
        let user = fetch_optional::<User>(pool, &q)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user: {}", username)))?;
        tracing::info!(username = %username, "user updated");
        Ok(user)
    }

    pub async fn remove(pool: &PgPool, username: &str) -> Result<(), AppError> {
        let deleted = sqlx::query_scalar::<_, String>("DELETE FROM users WHERE username = $1 RETURNING username")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("No user: {}", username)));
        }
        tracing::info!(username = %username, "user deleted");
        Ok(())
    }

    /// Record an application. Applying twice is a no-op.
    pub async fn apply_to_job(pool: &PgPool, username: &str, job_id: i32) -> Result<(), AppError> {
        let job = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(pool)
            .await?;
        if job.is_none() {
            return Err(AppError::NotFound(format!("No job: {}", job_id)));
        }
        let user = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        if user.is_none() {
            return Err(AppError::NotFound(format!("No user: {}", username)));
        }
        sqlx::query(
            "INSERT INTO applications (username, job_id) VALUES ($1, $2) ON CONFLICT (username, job_id) DO NOTHING",
        )
        .bind(username)
        .bind(job_id)
        .execute(pool)
        .await?;
        tracing::info!(username = %username, job_id, "applied to job");
        Ok(())
    }
}

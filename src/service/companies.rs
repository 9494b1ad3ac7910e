//! Company persistence.

use crate::config::COMPANY_COLUMNS;
use crate::error::AppError;
use crate::model::{Company, CompanyDetail, CompanyJob, CompanyPatch, NewCompany};
use crate::sql::exec::{fetch_all, fetch_optional, is_unique_violation};
use crate::sql::{sql_for_partial_update, sql_for_search, update_statement, CompanyFilter};
use sqlx::PgPool;

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

pub struct CompanyService;

impl CompanyService {
    /// Insert a company. A taken handle or name is a bad request.
    pub async fn create(pool: &PgPool, new: &NewCompany) -> Result<Company, AppError> {
        let duplicate = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&new.handle)
            .fetch_optional(pool)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::InvalidRequest(format!("Duplicate company: {}", new.handle)));
        }
        let sql = format!(
            "INSERT INTO companies ({}) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS, COLUMNS
        );
        tracing::debug!(sql = %sql, handle = %new.handle, "query");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(&new.handle)
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.num_employees)
            .bind(&new.logo_url)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::InvalidRequest(format!("Duplicate company: {}", new.handle))
                } else {
                    AppError::Db(e)
                }
            })?;
        tracing::info!(handle = %company.handle, "company created");
        Ok(company)
    }

    /// All companies matching `filter`, ordered by name.
    pub async fn find_all(pool: &PgPool, filter: &CompanyFilter) -> Result<Vec<Company>, AppError> {
        let base = format!("SELECT {} FROM companies", COLUMNS);
        let q = sql_for_search(&base, filter)?;
        fetch_all(pool, &q).await
    }

    /// One company with its jobs.
    pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, AppError> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COLUMNS);
        tracing::debug!(sql = %sql, handle = %handle, "query");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No company: {}", handle)))?;
        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity::text AS equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update. Zero rows updated is not-found.
    pub async fn update(pool: &PgPool, handle: &str, patch: CompanyPatch) -> Result<Company, AppError> {
        let set = sql_for_partial_update(&patch.into_field_set(), &COMPANY_COLUMNS)?;
        let q = update_statement("companies", set, "handle", handle, COLUMNS);
        let company = fetch_optional::<Company>(pool, &q)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No company: {}", handle)))?;
        tracing::info!(handle = %handle, "company updated");
        Ok(company)
    }

    pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), AppError> {
        let deleted = sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(pool)
            .await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("No company: {}", handle)));
        }
        tracing::info!(handle = %handle, "company deleted");
        Ok(())
    }
}

//! Job persistence.

use crate::config::JOB_COLUMNS;
use crate::error::AppError;
use crate::model::{Company, Job, JobDetail, JobListing, JobPatch, NewJob};
use crate::sql::exec::{fetch_all, fetch_optional, is_foreign_key_violation};
use crate::sql::{sql_for_partial_update, sql_for_search, update_statement, JobFilter};
use sqlx::PgPool;

const RETURNING: &str = "id, title, salary, equity::text AS equity, company_handle";

/// Jobs aliased `j` so filter predicates can qualify their columns.
const LIST_SELECT: &str = "SELECT j.id, j.title, j.salary, j.equity::text AS equity, j.company_handle, \
     c.name AS company_name \
     FROM jobs j LEFT JOIN companies AS c ON c.handle = j.company_handle";

pub struct JobService;

impl JobService {
    pub async fn create(pool: &PgPool, new: &NewJob) -> Result<Job, AppError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3::numeric, $4) RETURNING {}",
            RETURNING
        );
        tracing::debug!(sql = %sql, company = %new.company_handle, "query");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&new.title)
            .bind(new.salary)
            .bind(&new.equity)
            .bind(&new.company_handle)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::InvalidRequest(format!("No company: {}", new.company_handle))
                } else {
                    AppError::Db(e)
                }
            })?;
        tracing::info!(id = job.id, company = %job.company_handle, "job created");
        Ok(job)
    }

    /// All jobs matching `filter`, ordered by title, each with its company's name.
    pub async fn find_all(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobListing>, AppError> {
        let q = sql_for_search(LIST_SELECT, filter)?;
        fetch_all(pool, &q).await
    }

    /// One job with its company.
    pub async fn get(pool: &PgPool, id: i32) -> Result<JobDetail, AppError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", RETURNING);
        tracing::debug!(sql = %sql, id, "query");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No job: {}", id)))?;
        let company = sqlx::query_as::<_, Company>(
            "SELECT handle, name, description, num_employees, logo_url FROM companies WHERE handle = $1",
        )
        .bind(&job.company_handle)
        .fetch_one(pool)
        .await?;
        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    pub async fn update(pool: &PgPool, id: i32, patch: JobPatch) -> Result<Job, AppError> {
        let set = sql_for_partial_update(&patch.into_field_set(), &JOB_COLUMNS)?;
        let q = update_statement("jobs", set, "id", id, RETURNING);
        let job = fetch_optional::<Job>(pool, &q)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No job: {}", id)))?;
        tracing::info!(id, "job updated");
        Ok(job)
    }

    pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("No job: {}", id)));
        }
        tracing::info!(id, "job deleted");
        Ok(())
    }
}

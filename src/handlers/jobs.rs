//! Job handlers: search is public, mutations are admin-only.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::model::{JobPatch, NewJob};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{parse_body, JobService};
use crate::sql::JobFilter;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::InvalidRequest(format!("invalid job id: {}", id_str)))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let new: NewJob = parse_body(body)?;
    tracing::info!(actor = %actor.username, company = %new.company_handle, "create job");
    let job = JobService::create(&state.pool, &new).await?;
    Ok(success_one(job))
}

/// GET /jobs?title=&minSalary=&hasEquity=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = JobFilter::from_query(&params)?;
    let jobs = JobService::find_all(&state.pool, &filter).await?;
    Ok(success_many(jobs))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let job = JobService::get(&state.pool, id).await?;
    Ok(success_one_ok(job))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch: JobPatch = parse_body(body)?;
    tracing::info!(actor = %actor.username, id, "update job");
    let job = JobService::update(&state.pool, id, patch).await?;
    Ok(success_one_ok(job))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    tracing::info!(actor = %actor.username, id, "delete job");
    JobService::remove(&state.pool, id).await?;
    Ok(success_one_ok(json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("nope"), Err(AppError::InvalidRequest(_))));
    }
}

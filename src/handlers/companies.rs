//! Company handlers: search is public, mutations are admin-only.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::model::{CompanyPatch, NewCompany};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{parse_body, CompanyService};
use crate::sql::CompanyFilter;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let new: NewCompany = parse_body(body)?;
    tracing::info!(actor = %actor.username, handle = %new.handle, "create company");
    let company = CompanyService::create(&state.pool, &new).await?;
    Ok(success_one(company))
}

/// GET /companies?name=&minEmployees=&maxEmployees=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = CompanyFilter::from_query(&params)?;
    let companies = CompanyService::find_all(&state.pool, &filter).await?;
    Ok(success_many(companies))
}

pub async fn read(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let company = CompanyService::get(&state.pool, &handle).await?;
    Ok(success_one_ok(company))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(handle): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let patch: CompanyPatch = parse_body(body)?;
    tracing::info!(actor = %actor.username, handle = %handle, "update company");
    let company = CompanyService::update(&state.pool, &handle, patch).await?;
    Ok(success_one_ok(company))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(actor = %actor.username, handle = %handle, "delete company");
    CompanyService::remove(&state.pool, &handle).await?;
    Ok(success_one_ok(json!({ "deleted": handle })))
}

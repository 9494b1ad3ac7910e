//! User handlers. Listing and creating are admin-only; the rest is self-or-admin.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::handlers::jobs::parse_id;
use crate::model::{NewUser, UserPatch};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{parse_body, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

/// Admin-only: create a user (possibly an admin) and return a token for them.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let new: NewUser = parse_body(body)?;
    tracing::info!(actor = %actor.username, username = %new.username, is_admin = new.is_admin, "create user");
    let user = UserService::register(&state.pool, &state.passwords, new).await?;
    let token = state.tokens.issue(&user.username, user.is_admin)?;
    Ok(success_one(json!({ "user": user, "token": token })))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = UserService::find_all(&state.pool).await?;
    Ok(success_many(users))
}

pub async fn read(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::get(&state.pool, &username).await?;
    Ok(success_one_ok(user))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(username): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let patch: UserPatch = parse_body(body)?;
    tracing::info!(actor = %actor.username, username = %username, "update user");
    let user = UserService::update(&state.pool, &state.passwords, &username, patch).await?;
    Ok(success_one_ok(user))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(actor = %actor.username, username = %username, "delete user");
    UserService::remove(&state.pool, &username).await?;
    Ok(success_one_ok(json!({ "deleted": username })))
}

/// POST /users/:username/jobs/:id
pub async fn apply(
    State(state): State<AppState>,
    Path((username, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let job_id = parse_id(&id_str)?;
    UserService::apply_to_job(&state.pool, &username, job_id).await?;
    Ok(success_one(json!({ "applied": job_id })))
}

//! Login and self-service registration.

use crate::error::AppError;
use crate::model::{LoginRequest, NewUser, RegisterUser};
use crate::response::{success_one, success_one_ok};
use crate::service::{parse_body, UserService};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct TokenBody {
    pub token: String,
}

pub async fn token(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let login: LoginRequest = parse_body(body)?;
    let user = UserService::authenticate(&state.pool, &state.passwords, &login.username, &login.password).await?;
    let token = state.tokens.issue(&user.username, user.is_admin)?;
    Ok(success_one_ok(TokenBody { token }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let reg: RegisterUser = parse_body(body)?;
    let user = UserService::register(&state.pool, &state.passwords, NewUser::from(reg)).await?;
    let token = state.tokens.issue(&user.username, user.is_admin)?;
    Ok(success_one(TokenBody { token }))
}

//! Shared application state for all routes. Everything here is read-only after startup.

use crate::auth::{PasswordHasher, TokenIssuer};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenIssuer>,
    pub passwords: PasswordHasher,
}

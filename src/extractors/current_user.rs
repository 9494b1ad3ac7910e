//! Claims of the caller, as attached by the route guard.

use crate::auth::Claims;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Extractor for the verified caller. Only present behind a `guard` route layer.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

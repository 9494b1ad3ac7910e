//! Router assembly. Every API route sits behind `authenticate`; guarded groups add a `guard` route layer.

mod auth;
mod common;
mod companies;
mod jobs;
mod users;

pub use auth::auth_routes;
pub use common::common_routes_with_ready;
pub use companies::company_routes;
pub use jobs::job_routes;
pub use users::user_routes;

use crate::auth::authenticate;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn api_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(company_routes())
        .merge(job_routes())
        .merge(user_routes())
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        // Outside `authenticate`: the limit layer rewraps the request body.
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

//! Jobly API: companies, jobs, and users over REST with PostgreSQL.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{PasswordHasher, TokenIssuer};
pub use config::{validate_column_maps, Settings, ALL_COLUMN_MAPS};
pub use error::{AppError, ConfigError};
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{api_routes, common_routes_with_ready};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};

/// Full application router: health/ready/version plus the API.
pub fn app(state: AppState, body_limit: usize) -> axum::Router {
    common_routes_with_ready(state.clone()).merge(api_routes(state, body_limit))
}

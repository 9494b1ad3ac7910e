//! HTTP handlers: extract, validate, call the entity service, wrap the result.

pub mod auth;
pub mod companies;
pub mod jobs;
pub mod users;

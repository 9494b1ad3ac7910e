use crate::auth::{guard, RouteGuard};
use crate::handlers::jobs::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

pub fn job_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/jobs", get(list))
        .route("/jobs/:id", get(read));
    let admin = Router::new()
        .route("/jobs", post(create))
        .route("/jobs/:id", patch(update).delete(delete_handler))
        .route_layer(middleware::from_fn_with_state(RouteGuard::Admin, guard));
    public.merge(admin)
}

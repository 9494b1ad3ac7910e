use crate::auth::{guard, RouteGuard};
use crate::handlers::companies::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

pub fn company_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/companies", get(list))
        .route("/companies/:handle", get(read));
    let admin = Router::new()
        .route("/companies", post(create))
        .route("/companies/:handle", patch(update).delete(delete_handler))
        .route_layer(middleware::from_fn_with_state(RouteGuard::Admin, guard));
    public.merge(admin)
}

use crate::auth::{guard, RouteGuard};
use crate::handlers::users::{apply, create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn user_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/users", get(list).post(create))
        .route_layer(middleware::from_fn_with_state(RouteGuard::Admin, guard));
    let owner = Router::new()
        .route(
            "/users/:username",
            get(read).patch(update).delete(delete_handler),
        )
        .route("/users/:username/jobs/:id", post(apply))
        .route_layer(middleware::from_fn_with_state(RouteGuard::SelfOrAdmin("username"), guard));
    admin.merge(owner)
}

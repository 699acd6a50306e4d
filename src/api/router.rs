//! Router setup and configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, id, list, password, string};
use crate::api::middleware::auth::require_admin;
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health and metrics routes (no auth required)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    // Resource routes (admin auth required)
    let resource_routes = Router::new()
        .route("/list", get(list::list_resources))
        .route(
            "/string",
            post(string::create_string)
                .get(string::get_string)
                .delete(string::delete_string),
        )
        .route("/string/import", post(string::import_string))
        .route(
            "/password",
            post(password::create_password)
                .get(password::get_password)
                .delete(password::delete_password),
        )
        .route("/password/import", post(password::import_password))
        .route(
            "/id",
            post(id::create_id).get(id::get_id).delete(id::delete_id),
        )
        .route("/id/import", post(id::import_id))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(health_routes)
        .nest("/v1", resource_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

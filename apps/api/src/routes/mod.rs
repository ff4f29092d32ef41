pub mod analyze;
pub mod health;
pub mod profile;
pub mod tests_catalog;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(analyze::handle_analyze))
        .route("/api/tests", get(tests_catalog::handle_list_tests))
        .route(
            "/api/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_put_profile)
                .delete(profile::handle_delete_profile),
        )
        .with_state(state)
}

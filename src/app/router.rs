use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::app::state::AppState;
use crate::handler::health::health_handler;
use crate::handler::view::{invalid_url_fallback, view_handler};

/// Build the HTTP router (health + log view).
///
/// Every path outside the view prefix gets the invalid-url sentinel.
pub fn main_router(state: Arc<AppState>) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let view_router = Router::new()
        .route("/htmlify/{*file}", get(view_handler))
        .with_state(state);

    Router::new()
        .merge(v1_health_router)
        .merge(view_router)
        .fallback(invalid_url_fallback)
}

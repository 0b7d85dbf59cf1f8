//! API router.
//!
//! Returns a composable `Router` mounted under `/api/`. Path params use
//! `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the dashboard API router.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api/health", get(endpoints::health::check))
        .route("/api/patients", get(endpoints::patients::list))
        .route(
            "/api/patients/:id/dashboard",
            get(endpoints::patients::dashboard),
        )
        .route(
            "/api/patients/:id/history",
            get(endpoints::patients::history),
        )
        .route("/api/chat", post(endpoints::chat::send))
        .with_state(ctx)
}

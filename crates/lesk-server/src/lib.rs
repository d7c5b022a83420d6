pub mod config;
pub mod handlers;
pub mod rate_limit;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::{ApiError, AppState, OutcomeKind, PredictRequest, PredictResponse, router};
pub use rate_limit::RateLimiterLayer;

/// The routes wrapped in the serving middleware: rate limiting, permissive
/// CORS and request tracing.
pub fn app(state: AppState, rate_limit_rps: u32, rate_limit_burst: u32) -> Router {
    router(state)
        .layer(RateLimiterLayer::new(rate_limit_rps, rate_limit_burst))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

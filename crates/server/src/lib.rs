pub mod config;
pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router. All handlers are stateless; the config is
/// shared read-only.
pub fn app(config: config::Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Trainer
        .route("/api/trainer/evaluate", post(routes::trainer::evaluate_move))
        // Insights
        .route("/api/insights", post(routes::insights::get_insights))
        .route("/api/insights/breakdown", post(routes::insights::get_breakdown))
        // Variations
        .route("/api/variations/compare", post(routes::variations::compare_variations))
        .route("/api/variations/best", post(routes::variations::compare_with_best))
        .layer(Extension(config))
        .layer(cors)
}

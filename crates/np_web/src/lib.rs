use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod envelope;
pub mod handlers;
pub mod seed;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:id", get(handlers::get_article))
        .route("/api/chat", post(handlers::chat))
        .route("/api/execute-pipeline", post(handlers::execute_pipeline))
        .route("/api/pipeline-status", get(handlers::pipeline_status))
        .route("/api/setup-database", post(handlers::setup_database))
        .route("/api/clear-collections", post(handlers::clear_collections))
        .route("/api/insert-sample-data", post(handlers::insert_sample_data))
        .route("/api/test-connections", get(handlers::test_connections))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use np_core::{Article, Result};
}

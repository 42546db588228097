use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod platform;
pub mod provider;
pub mod resolver;
pub mod routes;
pub mod version;

use cache::CachePolicy;
use config::RepoPath;
use provider::{ReleaseSource, TextFetcher};

pub struct AppState {
    pub source: Arc<dyn ReleaseSource>,
    pub fetcher: Arc<dyn TextFetcher>,
    pub repo: RepoPath,
    pub cache: CachePolicy,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/latest/:platform", get(routes::latest))
        .route("/update/:target/:current_version", get(routes::update))
        .route("/health", get(routes::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod forms;
pub mod models;
pub mod views;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state for the whole application, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;

        db.run_migrations().await?;

        Ok(Arc::new(Self { db, config }))
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(controllers::home))
        .merge(controllers::routes())
        .fallback(controllers::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

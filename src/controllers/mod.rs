pub mod artists;
pub mod shows;
pub mod venues;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(venues::routes())
        .merge(artists::routes())
        .merge(shows::routes())
}

// GET /
pub async fn home() -> impl IntoResponse {
    Json(json!({
        "name": "Showbill",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Any route nothing else claimed.
pub async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "page not found" })),
    )
}

// Transient user-facing outcome of a mutation, queued for the presentation
// layer to display.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub success: bool,
    pub message: String,
}

pub(crate) fn notice(status: StatusCode, success: bool, message: String) -> Response {
    (status, Json(Notice { success, message })).into_response()
}

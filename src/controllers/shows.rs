use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Form, Json, Router,
};
use std::sync::Arc;

use super::notice;
use crate::error::AppError;
use crate::forms::ShowForm;
use crate::models::show;
use crate::views::ShowBoardEntry;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
}

// GET /shows
async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowBoardEntry>>, AppError> {
    let board = show::board(&state.db.pool).await?;
    Ok(Json(board))
}

// GET /shows/create
async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::default())
}

// POST /shows/create
async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Response {
    match create_show(&state, form).await {
        Ok(()) => notice(
            StatusCode::OK,
            true,
            "Show was successfully listed!".to_string(),
        ),
        Err(err) => {
            tracing::error!("create_show failed: {:?}", err);
            notice(
                err.status(),
                false,
                "An error occurred. Show could not be listed.".to_string(),
            )
        }
    }
}

async fn create_show(state: &AppState, form: ShowForm) -> Result<(), AppError> {
    let new_show = form.into_command()?;

    // A dangling artist_id or venue_id trips the foreign-key constraint
    // here; the rollback leaves no partial row behind.
    let mut tx = state.db.pool.begin().await?;
    match show::insert(&mut tx, &new_show).await {
        Ok(_id) => {
            tx.commit().await?;
            Ok(())
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e.into())
        }
    }
}

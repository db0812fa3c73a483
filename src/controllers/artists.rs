use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::notice;
use crate::error::AppError;
use crate::forms::{ArtistForm, SearchForm};
use crate::models::{artist, artist::RosterEntry, Artist};
use crate::views::{collect_matches, partition_shows, SearchResults, ShowCounterpartView};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/{artist_id}", get(show_artist))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route(
            "/artists/{artist_id}/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}

// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RosterEntry>>, AppError> {
    let roster = artist::roster(&state.db.pool).await?;
    Ok(Json(roster))
}

// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, AppError> {
    let rows = artist::search_by_prefix(&state.db.pool, &form.search_term).await?;
    Ok(Json(collect_matches(rows, Utc::now().naive_utc())))
}

#[derive(Debug, Serialize)]
struct ArtistDetail {
    #[serde(flatten)]
    artist: Artist,
    past_shows: Vec<ShowCounterpartView>,
    past_shows_count: usize,
    upcoming_shows: Vec<ShowCounterpartView>,
    upcoming_shows_count: usize,
}

// GET /artists/{artist_id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<i32>,
) -> Result<Json<ArtistDetail>, AppError> {
    let artist = artist::find_by_id(&state.db.pool, artist_id)
        .await?
        .ok_or(AppError::NotFound("artist"))?;
    let shows = artist::shows_with_venues(&state.db.pool, artist_id).await?;
    let (past_shows, upcoming_shows) = partition_shows(shows, Utc::now().naive_utc());

    Ok(Json(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

// GET /artists/create
async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

// POST /artists/create
async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> Response {
    let display_name = form.display_name();
    match create_artist(&state, form).await {
        Ok(name) => notice(
            StatusCode::OK,
            true,
            format!("Artist {} was successfully listed!", name),
        ),
        Err(err) => {
            tracing::error!("create_artist failed: {:?}", err);
            notice(
                err.status(),
                false,
                format!("An error occurred. Artist {} could not be listed.", display_name),
            )
        }
    }
}

async fn create_artist(state: &AppState, form: ArtistForm) -> Result<String, AppError> {
    let new_artist = form.into_command()?;

    let mut tx = state.db.pool.begin().await?;
    match artist::insert(&mut tx, &new_artist).await {
        Ok(_id) => {
            tx.commit().await?;
            Ok(new_artist.name)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e.into())
        }
    }
}

// GET /artists/{artist_id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<i32>,
) -> Result<Json<Artist>, AppError> {
    let artist = artist::find_by_id(&state.db.pool, artist_id)
        .await?
        .ok_or(AppError::NotFound("artist"))?;
    Ok(Json(artist))
}

// POST /artists/{artist_id}/edit
async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<i32>,
    Form(form): Form<ArtistForm>,
) -> Response {
    let display_name = form.display_name();
    match edit_artist(&state, artist_id, form).await {
        Ok(name) => notice(
            StatusCode::OK,
            true,
            format!("Artist was edited to be {} successfully.", name),
        ),
        Err(err) => {
            tracing::error!("edit_artist failed for id {}: {:?}", artist_id, err);
            notice(
                err.status(),
                false,
                format!("An error occurred. Artist {} could not be edited.", display_name),
            )
        }
    }
}

async fn edit_artist(state: &AppState, artist_id: i32, form: ArtistForm) -> Result<String, AppError> {
    let new_artist = form.into_command()?;

    let mut tx = state.db.pool.begin().await?;
    match artist::update(&mut tx, artist_id, &new_artist).await {
        Ok(0) => {
            tx.rollback().await?;
            Err(AppError::NotFound("artist"))
        }
        Ok(_) => {
            tx.commit().await?;
            Ok(new_artist.name)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e.into())
        }
    }
}

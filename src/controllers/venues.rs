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
use crate::forms::{SearchForm, VenueForm};
use crate::models::{venue, Venue};
use crate::views::{
    group_by_locale, collect_matches, partition_shows, LocaleGroup, SearchResults,
    ShowCounterpartView,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/{venue_id}", get(show_venue))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}

// GET /venues
async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocaleGroup>>, AppError> {
    let rows = venue::locale_rows(&state.db.pool).await?;
    Ok(Json(group_by_locale(rows, Utc::now().date_naive())))
}

// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, AppError> {
    let rows = venue::search_by_prefix(&state.db.pool, &form.search_term).await?;
    Ok(Json(collect_matches(rows, Utc::now().naive_utc())))
}

#[derive(Debug, Serialize)]
struct VenueDetail {
    #[serde(flatten)]
    venue: Venue,
    past_shows: Vec<ShowCounterpartView>,
    past_shows_count: usize,
    upcoming_shows: Vec<ShowCounterpartView>,
    upcoming_shows_count: usize,
}

// GET /venues/{venue_id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i32>,
) -> Result<Json<VenueDetail>, AppError> {
    let venue = venue::find_by_id(&state.db.pool, venue_id)
        .await?
        .ok_or(AppError::NotFound("venue"))?;
    let shows = venue::shows_with_artists(&state.db.pool, venue_id).await?;
    let (past_shows, upcoming_shows) = partition_shows(shows, Utc::now().naive_utc());

    Ok(Json(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

// GET /venues/create
async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

// POST /venues/create
async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Response {
    let display_name = form.display_name();
    match create_venue(&state, form).await {
        Ok(name) => notice(
            StatusCode::OK,
            true,
            format!("Venue {} was successfully listed!", name),
        ),
        Err(err) => {
            tracing::error!("create_venue failed: {:?}", err);
            notice(
                err.status(),
                false,
                format!("An error occurred. Venue {} could not be listed.", display_name),
            )
        }
    }
}

async fn create_venue(state: &AppState, form: VenueForm) -> Result<String, AppError> {
    let new_venue = form.into_command()?;

    let mut tx = state.db.pool.begin().await?;
    match venue::insert(&mut tx, &new_venue).await {
        Ok(_id) => {
            tx.commit().await?;
            Ok(new_venue.name)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e.into())
        }
    }
}

// GET /venues/{venue_id}/edit
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i32>,
) -> Result<Json<Venue>, AppError> {
    let venue = venue::find_by_id(&state.db.pool, venue_id)
        .await?
        .ok_or(AppError::NotFound("venue"))?;
    Ok(Json(venue))
}

// POST /venues/{venue_id}/edit
async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i32>,
    Form(form): Form<VenueForm>,
) -> Response {
    let display_name = form.display_name();
    match edit_venue(&state, venue_id, form).await {
        Ok(name) => notice(
            StatusCode::OK,
            true,
            format!("Venue was edited to be {} successfully.", name),
        ),
        Err(err) => {
            tracing::error!("edit_venue failed for id {}: {:?}", venue_id, err);
            notice(
                err.status(),
                false,
                format!("An error occurred. Venue {} could not be edited.", display_name),
            )
        }
    }
}

async fn edit_venue(state: &AppState, venue_id: i32, form: VenueForm) -> Result<String, AppError> {
    let new_venue = form.into_command()?;

    let mut tx = state.db.pool.begin().await?;
    match venue::update(&mut tx, venue_id, &new_venue).await {
        // Last writer wins; only a missing id is an error.
        Ok(0) => {
            tx.rollback().await?;
            Err(AppError::NotFound("venue"))
        }
        Ok(_) => {
            tx.commit().await?;
            Ok(new_venue.name)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e.into())
        }
    }
}

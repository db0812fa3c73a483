use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;

/* ---------- venue listing ---------- */

// One row per venue/show pair from the locale LEFT JOIN; venues without
// shows come back with a NULL start_time.
#[derive(Debug, Clone, FromRow)]
pub struct VenueLocaleRow {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub start_time: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct LocaleGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Partition venues by (city, state). A show counts as upcoming here when
/// its start date falls on or after `today` -- date precision only, unlike
/// the search annotation below which compares full timestamps.
pub fn group_by_locale(rows: Vec<VenueLocaleRow>, today: NaiveDate) -> Vec<LocaleGroup> {
    let mut groups: BTreeMap<(String, String), BTreeMap<i32, VenueSummary>> = BTreeMap::new();

    for row in rows {
        let VenueLocaleRow { id, name, city, state, start_time } = row;
        let venues = groups.entry((city, state)).or_default();
        let venue = venues.entry(id).or_insert(VenueSummary {
            id,
            name,
            num_upcoming_shows: 0,
        });
        if let Some(start) = start_time {
            if start.date() >= today {
                venue.num_upcoming_shows += 1;
            }
        }
    }

    groups
        .into_iter()
        .map(|((city, state), venues)| LocaleGroup {
            city,
            state,
            venues: venues.into_values().collect(),
        })
        .collect()
}

/* ---------- prefix search ---------- */

// One row per entity/show pair from the search LEFT JOIN.
#[derive(Debug, Clone, FromRow)]
pub struct SearchRow {
    pub id: i32,
    pub name: String,
    pub start_time: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct SearchMatch {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

/// Fold joined search rows into per-entity matches. A show counts as
/// upcoming when it starts strictly after `now`.
pub fn collect_matches(rows: Vec<SearchRow>, now: NaiveDateTime) -> SearchResults {
    let mut matches: BTreeMap<i32, SearchMatch> = BTreeMap::new();

    for SearchRow { id, name, start_time } in rows {
        let entry = matches.entry(id).or_insert(SearchMatch {
            id,
            name,
            num_upcoming_shows: 0,
        });
        if let Some(start) = start_time {
            if start > now {
                entry.num_upcoming_shows += 1;
            }
        }
    }

    let data: Vec<SearchMatch> = matches.into_values().collect();
    SearchResults { count: data.len(), data }
}

/// Escape LIKE wildcards so a search term is matched literally. The bound
/// pattern appends the trailing `%` itself.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/* ---------- entity detail ---------- */

// A show joined with the counterpart entity: the artist on a venue page,
// the venue on an artist page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowCounterpartView {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// Split shows into (past, upcoming) by direct timestamp comparison.
/// A show starting exactly at `now` is upcoming.
pub fn partition_shows(
    shows: Vec<ShowCounterpartView>,
    now: NaiveDateTime,
) -> (Vec<ShowCounterpartView>, Vec<ShowCounterpartView>) {
    shows.into_iter().partition(|show| show.start_time < now)
}

/* ---------- show board ---------- */

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowBoardEntry {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::forms::NewArtist;
use crate::views::{escape_like, SearchRow, ShowCounterpartView};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub venue_description: Option<String>,
}

// The artist index is a flat roster, unlike the venue listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterEntry {
    pub id: i32,
    pub name: String,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Artist>, sqlx::Error> {
    sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn roster(pool: &PgPool) -> Result<Vec<RosterEntry>, sqlx::Error> {
    sqlx::query_as::<_, RosterEntry>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn search_by_prefix(pool: &PgPool, term: &str) -> Result<Vec<SearchRow>, sqlx::Error> {
    let pattern = format!("{}%", escape_like(term));
    sqlx::query_as::<_, SearchRow>(
        r#"
        SELECT a.id, a.name, s.start_time
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id
        WHERE a.name ILIKE $1
        ORDER BY a.id
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn shows_with_venues(
    pool: &PgPool,
    artist_id: i32,
) -> Result<Vec<ShowCounterpartView>, sqlx::Error> {
    sqlx::query_as::<_, ShowCounterpartView>(
        r#"
        SELECT v.id, v.name, v.image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = $1
        ORDER BY s.start_time
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(tx: &mut Transaction<'_, Postgres>, artist: &NewArtist) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO artists
            (name, city, state, phone, genres, image_link, website, facebook_link,
             seeking_venue, venue_description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.genres)
    .bind(&artist.image_link)
    .bind(&artist.website)
    .bind(&artist.facebook_link)
    .bind(artist.seeking_venue)
    .bind(&artist.venue_description)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    artist: &NewArtist,
) -> Result<u64, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE artists
        SET name = $1, city = $2, state = $3, phone = $4, genres = $5,
            image_link = $6, website = $7, facebook_link = $8,
            seeking_venue = $9, venue_description = $10
        WHERE id = $11
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.genres)
    .bind(&artist.image_link)
    .bind(&artist.website)
    .bind(&artist.facebook_link)
    .bind(artist.seeking_venue)
    .bind(&artist.venue_description)
    .bind(id)
    .execute(&mut **tx)
    .await
    .map(|r| r.rows_affected())
}

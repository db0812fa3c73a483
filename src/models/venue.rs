use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::forms::NewVenue;
use crate::views::{escape_like, SearchRow, ShowCounterpartView, VenueLocaleRow};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub talent_description: Option<String>,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Venue>, sqlx::Error> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

// Every venue with its shows, one row per pair, for the grouped listing.
pub async fn locale_rows(pool: &PgPool) -> Result<Vec<VenueLocaleRow>, sqlx::Error> {
    sqlx::query_as::<_, VenueLocaleRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state, s.start_time
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        ORDER BY v.state, v.city, v.id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn search_by_prefix(pool: &PgPool, term: &str) -> Result<Vec<SearchRow>, sqlx::Error> {
    let pattern = format!("{}%", escape_like(term));
    sqlx::query_as::<_, SearchRow>(
        r#"
        SELECT v.id, v.name, s.start_time
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        WHERE v.name ILIKE $1
        ORDER BY v.id
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn shows_with_artists(
    pool: &PgPool,
    venue_id: i32,
) -> Result<Vec<ShowCounterpartView>, sqlx::Error> {
    sqlx::query_as::<_, ShowCounterpartView>(
        r#"
        SELECT a.id, a.name, a.image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = $1
        ORDER BY s.start_time
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(tx: &mut Transaction<'_, Postgres>, venue: &NewVenue) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO venues
            (name, city, state, address, phone, image_link, website, facebook_link,
             seeking_talent, talent_description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.website)
    .bind(&venue.facebook_link)
    .bind(venue.seeking_talent)
    .bind(&venue.talent_description)
    .fetch_one(&mut **tx)
    .await
}

// Full-field overwrite; returns the number of rows hit so the caller can
// distinguish a missing id.
pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    venue: &NewVenue,
) -> Result<u64, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE venues
        SET name = $1, city = $2, state = $3, address = $4, phone = $5,
            image_link = $6, website = $7, facebook_link = $8,
            seeking_talent = $9, talent_description = $10
        WHERE id = $11
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.website)
    .bind(&venue.facebook_link)
    .bind(venue.seeking_talent)
    .bind(&venue.talent_description)
    .bind(id)
    .execute(&mut **tx)
    .await
    .map(|r| r.rows_affected())
}

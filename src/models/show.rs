use sqlx::{PgPool, Postgres, Transaction};

use crate::forms::NewShow;
use crate::views::ShowBoardEntry;

// Every show with both parent names, for the board page.
pub async fn board(pool: &PgPool) -> Result<Vec<ShowBoardEntry>, sqlx::Error> {
    sqlx::query_as::<_, ShowBoardEntry>(
        r#"
        SELECT s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time
        "#,
    )
    .fetch_all(pool)
    .await
}

// Existence of the referenced artist and venue is left to the foreign-key
// constraints; a violation fails the insert.
pub async fn insert(tx: &mut Transaction<'_, Postgres>, show: &NewShow) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO shows (artist_id, venue_id, start_time)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(show.artist_id)
    .bind(show.venue_id)
    .bind(show.start_time)
    .fetch_one(&mut **tx)
    .await
}

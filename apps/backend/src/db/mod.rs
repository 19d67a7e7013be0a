//! SQLite database operations

use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Upper bound on attempts returned by one listing.
pub const MAX_ATTEMPTS_LIMIT: u32 = 200;
pub const DEFAULT_ATTEMPTS_LIMIT: u32 = 50;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool, e.g. a single-connection in-memory database.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Bookmark Repository ===

    /// Bookmark a surah. Bookmarking it again refreshes the names only.
    pub async fn add_bookmark(&self, req: &CreateBookmarkRequest) -> Result<Bookmark> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (surah_number, name, english_name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (surah_number) DO UPDATE SET
                name = excluded.name,
                english_name = excluded.english_name
            RETURNING surah_number, name, english_name, created_at
            "#,
        )
        .bind(i64::from(req.surah_number))
        .bind(&req.name)
        .bind(&req.english_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(bookmark)
    }

    /// Remove a bookmark. Returns false when none existed.
    pub async fn remove_bookmark(&self, surah_number: u16) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE surah_number = ?1")
            .bind(i64::from(surah_number))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All bookmarks in surah order
    pub async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT surah_number, name, english_name, created_at
            FROM bookmarks
            ORDER BY surah_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookmarks)
    }

    // === Attempt Repository ===

    /// Record a checked recitation
    pub async fn insert_attempt(
        &self,
        surah: Option<&str>,
        verse: Option<u32>,
        transcript: &str,
        check: &RecitationCheck,
    ) -> Result<RecitationAttempt> {
        let attempt = sqlx::query_as::<_, RecitationAttempt>(
            r#"
            INSERT INTO recitation_attempts
                (id, surah, verse, transcript, similarity, threshold, accepted, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, surah, verse, transcript, similarity, threshold, accepted, created_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(surah)
        .bind(verse.map(i64::from))
        .bind(transcript)
        .bind(check.similarity)
        .bind(check.threshold)
        .bind(check.verdict.is_accepted())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(attempt)
    }

    /// Most recent attempts first, optionally for one surah and verse
    pub async fn list_attempts(&self, query: &AttemptQuery) -> Result<Vec<RecitationAttempt>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_ATTEMPTS_LIMIT)
            .clamp(1, MAX_ATTEMPTS_LIMIT);

        let attempts = sqlx::query_as::<_, RecitationAttempt>(
            r#"
            SELECT id, surah, verse, transcript, similarity, threshold, accepted, created_at
            FROM recitation_attempts
            WHERE (?1 IS NULL OR surah = ?1)
              AND (?2 IS NULL OR verse = ?2)
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?3
            "#,
        )
        .bind(query.surah.as_deref())
        .bind(query.verse.map(i64::from))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}

//! Repository for the `movies` table.

use std::future::Future;
use std::time::Duration;

use reelview_core::filters::{calculate_metadata, Filters, Metadata};
use reelview_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::error::DbError;
use crate::models::movie::Movie;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, overview, language, release_date, rating, \
     poster_url, backdrop_url, genres, version";

/// Default upper bound on a single operation.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// SQLSTATE `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

/// A movie row carrying the windowed total of the query it came from.
#[derive(Debug, FromRow)]
struct MovieWithTotal {
    total_records: i64,
    #[sqlx(flatten)]
    movie: Movie,
}

/// Provides CRUD and search operations for movies.
///
/// Holds a clone of the process-wide pool; cloning the repository is cheap.
///
/// Every operation runs in its own transaction with `statement_timeout` set
/// locally, so the server cancels a statement that outlives the timeout and
/// nothing is committed unless the statement finished in time.
#[derive(Debug, Clone)]
pub struct MovieRepo {
    pool: PgPool,
    timeout: Duration,
}

impl MovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Insert a new movie and write the generated `id`, `created_at` and
    /// `version` back into `movie`.
    pub async fn insert(&self, movie: &mut Movie) -> Result<(), DbError> {
        let query = "INSERT INTO movies \
                (title, overview, language, release_date, rating, poster_url, backdrop_url, genres) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, created_at, version";

        let input: &Movie = movie;
        let (id, created_at, version) = self
            .timed("insert", |mut tx| async move {
                let row = sqlx::query_as::<_, (DbId, Timestamp, i32)>(query)
                    .bind(&input.title)
                    .bind(&input.overview)
                    .bind(&input.language)
                    .bind(input.release_date)
                    .bind(input.rating)
                    .bind(&input.poster_url)
                    .bind(&input.backdrop_url)
                    .bind(&input.genres)
                    .fetch_one(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(row)
            })
            .await?;

        movie.id = id;
        movie.created_at = created_at;
        movie.version = version;

        tracing::debug!(movie_id = id, "Inserted movie");
        Ok(())
    }

    /// Find a movie by ID.
    ///
    /// Non-positive IDs fail with [`DbError::RecordNotFound`] without a query.
    pub async fn get(&self, id: DbId) -> Result<Movie, DbError> {
        if id < 1 {
            return Err(DbError::RecordNotFound);
        }

        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        let query = query.as_str();
        self.timed("get", |mut tx| async move {
            let movie = sqlx::query_as::<_, Movie>(query)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok(movie)
        })
        .await?
        .ok_or(DbError::RecordNotFound)
    }

    /// Search movies by title words and required genres, returning one page
    /// plus pagination metadata.
    ///
    /// An empty `title` or `genres` matches every row. `filters` must have
    /// been validated; the total is computed with `count(*) OVER()` in the
    /// same query as the page.
    pub async fn list(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), DbError> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS} \
             FROM movies \
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
               AND (genres @> $2 OR $2 = '{{}}') \
             ORDER BY {} {}, id ASC \
             LIMIT $3 OFFSET $4",
            filters.sort_column(),
            filters.sort_direction(),
        );
        let query = query.as_str();

        let rows = self
            .timed("list", |mut tx| async move {
                let rows = sqlx::query_as::<_, MovieWithTotal>(query)
                    .bind(title)
                    .bind(genres)
                    .bind(filters.limit())
                    .bind(filters.offset())
                    .fetch_all(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(rows)
            })
            .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        let movies: Vec<Movie> = rows.into_iter().map(|row| row.movie).collect();
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);

        tracing::debug!(
            total_records,
            returned = movies.len(),
            page = filters.page,
            "Listed movies"
        );
        Ok((movies, metadata))
    }

    /// Replace all editable fields of `movie`, conditional on its `version`
    /// still matching the stored one.
    ///
    /// On success `movie.version` is advanced to the stored value. A stale
    /// version (or a row deleted in the meantime) yields
    /// [`DbError::EditConflict`].
    pub async fn update(&self, movie: &mut Movie) -> Result<(), DbError> {
        let query = "UPDATE movies SET \
                title = $1, \
                overview = $2, \
                language = $3, \
                release_date = $4, \
                rating = $5, \
                poster_url = $6, \
                backdrop_url = $7, \
                genres = $8, \
                version = version + 1 \
             WHERE id = $9 AND version = $10 \
             RETURNING version";

        let input: &Movie = movie;
        let new_version = self
            .timed("update", |mut tx| async move {
                let version = sqlx::query_scalar::<_, i32>(query)
                    .bind(&input.title)
                    .bind(&input.overview)
                    .bind(&input.language)
                    .bind(input.release_date)
                    .bind(input.rating)
                    .bind(&input.poster_url)
                    .bind(&input.backdrop_url)
                    .bind(&input.genres)
                    .bind(input.id)
                    .bind(input.version)
                    .fetch_optional(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(version)
            })
            .await?;

        match new_version {
            Some(version) => {
                tracing::debug!(movie_id = movie.id, version, "Updated movie");
                movie.version = version;
                Ok(())
            }
            None => {
                tracing::warn!(
                    movie_id = movie.id,
                    version = movie.version,
                    "Edit conflict on movie update"
                );
                Err(DbError::EditConflict)
            }
        }
    }

    /// Permanently delete a movie by ID.
    pub async fn delete(&self, id: DbId) -> Result<(), DbError> {
        if id < 1 {
            return Err(DbError::RecordNotFound);
        }

        let result = self
            .timed("delete", |mut tx| async move {
                let result = sqlx::query("DELETE FROM movies WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(result)
            })
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::RecordNotFound);
        }

        tracing::debug!(movie_id = id, "Deleted movie");
        Ok(())
    }

    /// Run one operation in a transaction bounded by the configured timeout.
    ///
    /// The timeout is enforced twice: `statement_timeout` makes the server
    /// cancel the statement, and the client drops the future on expiry. `op`
    /// must commit the transaction itself; a dropped transaction rolls back,
    /// so a timed-out write is never persisted.
    async fn timed<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T, DbError>
    where
        F: FnOnce(Transaction<'static, Postgres>) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let run = async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("SELECT set_config('statement_timeout', $1, true)")
                .bind(statement_timeout(self.timeout))
                .execute(&mut *tx)
                .await?;
            op(tx).await
        };

        match tokio::time::timeout(self.timeout, run).await {
            Ok(Err(err)) if is_query_canceled(&err) => {
                tracing::warn!(operation, timeout = ?self.timeout, "Movie query canceled by server");
                Err(DbError::Timeout(self.timeout))
            }
            Ok(result) => result.map_err(DbError::from),
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "Movie query timed out");
                Err(DbError::Timeout(self.timeout))
            }
        }
    }
}

/// `statement_timeout` value for `timeout`; `0` would disable it, so round up.
fn statement_timeout(timeout: Duration) -> String {
    format!("{}ms", timeout.as_millis().max(1))
}

fn is_query_canceled(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(QUERY_CANCELED))
}

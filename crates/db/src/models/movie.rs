//! Movie entity model and validation.

use chrono::{NaiveDate, Utc};
use reelview_core::movie::{check_genres, check_release_date, check_title};
use reelview_core::types::{DbId, Timestamp};
use reelview_core::validator::Validator;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `movies` table.
///
/// `id`, `created_at` and `version` are assigned by the database; a freshly
/// built value carries their defaults until it is inserted.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    pub title: String,
    pub overview: String,
    pub language: String,
    /// NOT NULL in the database; `None` only on unvalidated input.
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "vote_average")]
    pub rating: f64,
    pub poster_url: String,
    pub backdrop_url: String,
    /// NOT NULL in the database; `None` only on unvalidated input.
    pub genres: Option<Vec<String>>,
    pub version: i32,
}

/// Record every field violation of `movie` into `v`.
pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    check_title(v, &movie.title);
    check_release_date(v, movie.release_date, Utc::now().date_naive());
    check_genres(v, movie.genres.as_deref());
}

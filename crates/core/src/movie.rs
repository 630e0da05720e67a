//! Movie field rules and sort configuration.
//!
//! The checks here take plain field values so they can be exercised without a
//! database row; `reelview_db::models::movie::validate_movie` composes them.

use chrono::{Datelike, NaiveDate};

use crate::validator::{unique, Validator};

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Maximum title length in bytes.
pub const MAX_TITLE_BYTES: usize = 500;

/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: i32 = 1888;

pub const MIN_GENRES: usize = 1;

/// Upper genre count accepted by validation.
pub const MAX_GENRES: usize = 10;

/// Upper genre count accepted by the `movies_genres_length_check` constraint.
///
/// Narrower than [`MAX_GENRES`]: a movie with 6-10 genres passes validation
/// and is then rejected by the database with a check violation.
pub const SCHEMA_MAX_GENRES: usize = 5;

/* --------------------------------------------------------------------------
   Sorting
   -------------------------------------------------------------------------- */

/// Sort tokens accepted for movie listings.
pub const MOVIE_SORT_SAFELIST: &[&str] = &[
    "id",
    "title",
    "release_date",
    "rating",
    "-id",
    "-title",
    "-release_date",
    "-rating",
];

pub const DEFAULT_MOVIE_SORT: &str = "id";

/* --------------------------------------------------------------------------
   Field checks
   -------------------------------------------------------------------------- */

pub fn check_title(v: &mut Validator, title: &str) {
    v.check(!title.is_empty(), "title", "must be provided");
    v.check(
        title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );
}

/// `today` is injected so the future-date rule can be tested deterministically.
pub fn check_release_date(v: &mut Validator, release_date: Option<NaiveDate>, today: NaiveDate) {
    let Some(date) = release_date else {
        v.add_error("release_date", "must be provided");
        return;
    };
    v.check(
        date.year() >= MIN_RELEASE_YEAR,
        "release_date",
        "year must not be earlier than 1888",
    );
    v.check(date <= today, "release_date", "must not be in the future");
}

pub fn check_genres(v: &mut Validator, genres: Option<&[String]>) {
    let Some(genres) = genres else {
        v.add_error("genres", "must be provided");
        return;
    };
    v.check(
        genres.len() >= MIN_GENRES,
        "genres",
        "must contain at least 1 genre",
    );
    v.check(
        genres.len() <= MAX_GENRES,
        "genres",
        "must not contain more than 10 genres",
    );
    v.check(unique(genres), "genres", "must not contain duplicate values");
}

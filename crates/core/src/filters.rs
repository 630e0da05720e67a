//! Paging and sorting resolution for list queries.
//!
//! Raw client input ([`FilterParams`]) is turned into a bounded [`Filters`]
//! value. The sort token is matched against a per-entity safe-list, and only
//! the safe-list's own `&'static str` ever reaches generated SQL.

use serde::{Deserialize, Serialize};

use crate::validator::{permitted_value, Validator};

// ---------------------------------------------------------------------------
// Bounds and defaults
// ---------------------------------------------------------------------------

/// Highest page number a client may request.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Untrusted paging/sorting input as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
}

/// Resolved paging and sorting configuration for one list query.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Raw sort token, optionally prefixed with `-` for descending order.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        sort_safelist: &'static [&'static str],
    ) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist,
        }
    }

    /// Fill missing parameters with defaults. The result still has to be
    /// passed through [`Filters::validate`].
    pub fn from_params(
        params: FilterParams,
        default_sort: &str,
        sort_safelist: &'static [&'static str],
    ) -> Self {
        Self {
            page: params.page.unwrap_or(DEFAULT_PAGE),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort: params.sort.unwrap_or_else(|| default_sort.to_string()),
            sort_safelist,
        }
    }

    /// Record every paging/sorting violation into `v`.
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(
            self.page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );
        v.check(
            permitted_value(&self.sort.as_str(), self.sort_safelist),
            "sort",
            "invalid sort value",
        );
    }

    /// Column identifier for `ORDER BY`, without the direction prefix.
    ///
    /// # Panics
    ///
    /// Panics if the sort token is not in the safe-list. Callers must run
    /// [`Filters::validate`] first, so reaching this is a programming error.
    pub fn sort_column(&self) -> &'static str {
        let safelist: &'static [&'static str] = self.sort_safelist;
        match safelist.iter().copied().find(|safe| *safe == self.sort) {
            Some(safe) => safe.trim_start_matches('-'),
            None => panic!("unsafe sort parameter: {}", self.sort),
        }
    }

    pub fn sort_direction(&self) -> &'static str {
        if self.sort.starts_with('-') {
            "DESC"
        } else {
            "ASC"
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

// ---------------------------------------------------------------------------
// Pagination metadata
// ---------------------------------------------------------------------------

/// Summary returned alongside one page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

/// Compute pagination metadata for a result set of `total_records` rows.
///
/// Returns the zero value when there are no records.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    // page_size < 1 never survives validation; guard the division anyway.
    if total_records == 0 || page_size < 1 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Trail filter and sort construction
//!
//! Caller-supplied field names are parsed into closed enums. A name that does
//! not match any variant (case-insensitively) yields no filter or no sort,
//! never an error.
//!
//! ```rust
//! use trails_service::repository::{SortDirection, TrailQuery, TrailSortField};
//!
//! let query = TrailQuery::from_params(Some("Name"), Some("track"), Some("length"), false);
//! assert_eq!(query.sort, Some((TrailSortField::Length, SortDirection::Descending)));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::domain::Trail;

/// Fields a trail listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrailFilterField {
    Name,
}

impl TrailFilterField {
    /// Parses a caller-supplied field name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("name") {
            Some(Self::Name)
        } else {
            None
        }
    }

    /// The text of `trail` this field filters on.
    pub fn value<'a>(&self, trail: &'a Trail) -> &'a str {
        match self {
            Self::Name => &trail.name,
        }
    }
}

/// Fields a trail listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrailSortField {
    Name,
    Length,
}

impl TrailSortField {
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("name") {
            Some(Self::Name)
        } else if name.eq_ignore_ascii_case("length") {
            Some(Self::Length)
        } else {
            None
        }
    }

    /// Ascending comparison of two trails on this field.
    ///
    /// Names compare by code point (case-sensitive); lengths use the IEEE
    /// total order so the comparison is total even for NaN.
    pub fn compare(&self, a: &Trail, b: &Trail) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Length => a.length_in_km.total_cmp(&b.length_in_km),
        }
    }
}

/// Sort direction for trail listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn from_ascending(is_ascending: bool) -> Self {
        if is_ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Case-insensitive substring predicate on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailFilter {
    pub field: TrailFilterField,
    needle: String,
}

impl TrailFilter {
    pub fn new(field: TrailFilterField, query: &str) -> Self {
        Self {
            field,
            needle: query.to_lowercase(),
        }
    }

    pub fn matches(&self, trail: &Trail) -> bool {
        self.field
            .value(trail)
            .to_lowercase()
            .contains(&self.needle)
    }
}

/// A filter and ordering to apply to a full trail sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrailQuery {
    pub filter: Option<TrailFilter>,
    pub sort: Option<(TrailSortField, SortDirection)>,
}

impl TrailQuery {
    /// Builds a query from raw listing parameters.
    ///
    /// The filter applies only when `filter_on` names a known field and
    /// `filter_query` is non-empty. An unknown `sort_by` leaves the store's
    /// native order untouched, and `is_ascending` is then ignored.
    pub fn from_params(
        filter_on: Option<&str>,
        filter_query: Option<&str>,
        sort_by: Option<&str>,
        is_ascending: bool,
    ) -> Self {
        let filter = match (filter_on.and_then(TrailFilterField::parse), filter_query) {
            (Some(field), Some(query)) if !query.is_empty() => Some(TrailFilter::new(field, query)),
            _ => None,
        };

        let sort = sort_by
            .and_then(TrailSortField::parse)
            .map(|field| (field, SortDirection::from_ascending(is_ascending)));

        Self { filter, sort }
    }

    /// Filters, then sorts, the given trails.
    ///
    /// Sorting is stable. A descending sort is the ascending result reversed,
    /// so ties come out in reverse native order.
    pub fn apply(&self, trails: Vec<Trail>) -> Vec<Trail> {
        let mut selected: Vec<Trail> = match &self.filter {
            Some(filter) => trails.into_iter().filter(|t| filter.matches(t)).collect(),
            None => trails,
        };

        if let Some((field, direction)) = self.sort {
            selected.sort_by(|a, b| field.compare(a, b));
            if direction == SortDirection::Descending {
                selected.reverse();
            }
        }

        selected
    }
}

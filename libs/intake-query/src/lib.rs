#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Read pipeline for in-memory collections.
//!
//! A [`Query`] runs four composable stages over an owned collection:
//!
//! 1. status filter ([`StatusFilter`], records implement [`HasStatus`])
//! 2. case-insensitive substring search ([`Searchable`])
//! 3. stable single-field sort ([`Sortable`], [`SortKey`], [`SortDir`])
//! 4. 1-based pagination ([`PageRequest`] -> [`Page`])
//!
//! ```rust,ignore
//! let page = Query::new(records)
//!     .filter_by_status(&StatusFilter::from_param(Some("PENDING")))
//!     .search("jane")
//!     .sort(MySortField::Name, SortDir::Asc)
//!     .paginate(limits.page_request(Some(1), Some(10))?);
//! ```
pub mod errors;
pub mod limits;
pub mod page;
pub mod pipeline;

pub use errors::QueryError;
pub use limits::QueryLimits;
pub use page::{Page, PageInfo, PageRequest};
pub use pipeline::{
    matches_search, HasStatus, Query, Searchable, SortKey, Sortable, StatusFilter, ALL_STATUSES,
};

use std::str::FromStr;

// Ordering primitives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SortDir {
    #[serde(rename = "asc")]
    Asc,
    #[default]
    #[serde(rename = "desc")]
    Desc,
}

impl SortDir {
    /// Reverse the sort direction (Asc <-> Desc)
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl FromStr for SortDir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(QueryError::InvalidSortDirection(other.to_owned())),
        }
    }
}

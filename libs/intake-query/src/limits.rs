//! Input validation and safety limits for list queries
//!
//! This module enforces sane caps on pagination input:
//! - `page` is 1-based and never zero
//! - `limit` is between 1 and `max_limit`; zero is rejected rather than
//!   treated as unbounded
//! - missing values fall back to page 1 and `default_limit`

use crate::{PageRequest, QueryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Page size used when the caller does not send one (default: 10)
    pub default_limit: u64,
    /// Largest accepted page size (default: 100)
    pub max_limit: u64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl QueryLimits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_limit(mut self, default_limit: u64) -> Self {
        self.default_limit = default_limit;
        self
    }

    #[must_use]
    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Validate a limit value against the configured cap.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidLimit`] for zero or anything above `max_limit`.
    pub fn validate_limit(&self, limit: u64) -> Result<(), QueryError> {
        if limit == 0 || limit > self.max_limit {
            return Err(QueryError::InvalidLimit {
                limit,
                max: self.max_limit,
            });
        }
        Ok(())
    }

    /// Build a [`PageRequest`] from optional raw values, applying defaults.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidPage`] for page zero and
    /// [`QueryError::InvalidLimit`] when the limit is out of bounds.
    pub fn page_request(&self, page: Option<u64>, limit: Option<u64>) -> Result<PageRequest, QueryError> {
        let limit = limit.unwrap_or(self.default_limit);
        self.validate_limit(limit)?;
        PageRequest::new(page.unwrap_or(1), limit)
    }

    /// Parse an optional numeric query-string parameter.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidNumber`] when the value is not an unsigned integer.
    pub fn parse_param(param: &'static str, raw: Option<&str>) -> Result<Option<u64>, QueryError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse::<u64>()
                .map(Some)
                .map_err(|_| QueryError::InvalidNumber {
                    param,
                    value: value.to_owned(),
                }),
        }
    }
}

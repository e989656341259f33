use thiserror::Error;

/// Errors raised while turning raw query parameters into a runnable query.
///
/// The pipeline stages themselves never fail; only parameter parsing does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("page must be 1 or greater")]
    InvalidPage,

    #[error("limit must be between 1 and {max}, got {limit}")]
    InvalidLimit { limit: u64, max: u64 },

    #[error("invalid value for '{param}': {value}")]
    InvalidNumber { param: &'static str, value: String },

    #[error("unsupported sort field: {0}")]
    UnknownSortField(String),

    #[error("unsupported sort direction: {0} (expected 'asc' or 'desc')")]
    InvalidSortDirection(String),
}

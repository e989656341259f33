use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Validated 1-based page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// # Errors
    /// Returns [`QueryError::InvalidPage`] for page zero and
    /// [`QueryError::InvalidLimit`] for a zero limit.
    pub fn new(page: u64, limit: u64) -> Result<Self, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage);
        }
        if limit == 0 {
            return Err(QueryError::InvalidLimit { limit, max: 0 });
        }
        Ok(Self { page, limit })
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Index of the first item on this page. Saturates instead of overflowing
    /// so that absurd page numbers simply produce an empty page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    /// Number of items that matched before slicing.
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total.div_ceil(request.limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Map items while keeping the pagination metadata.
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

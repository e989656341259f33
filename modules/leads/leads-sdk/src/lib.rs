//! Leads SDK
//!
//! This crate provides the public API for the `leads` module:
//! - `LeadsClient` trait
//! - Model types for leads, submissions and list queries
//! - Error type (`LeadsError`) with a single user-facing message normaliser
//! - The fixed form catalog (countries, visa categories)
//! - `LeadViewCache`, the admin dashboard's optimistic view cache
//!
//! ## Usage
//!
//! ```ignore
//! use leads_sdk::{LeadQuery, LeadStatus, LeadViewCache};
//!
//! let cache = LeadViewCache::new(client);
//! let page = cache.fetch(&LeadQuery::default()).await?;
//! cache.update_status(&page.items[0].id, LeadStatus::ReachedOut).await?;
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod sync;

pub use api::LeadsClient;
pub use errors::{FieldErrors, GENERIC_FAILURE_MESSAGE, LeadsError};
pub use models::{
    Lead, LeadPatch, LeadQuery, LeadSearchField, LeadSortField, LeadStatus, LeadSubmission,
    ResumeUpload, UnknownStatus, non_blank,
};
pub use sync::LeadViewCache;

pub use intake_query::{Page, PageInfo, SortDir, StatusFilter};

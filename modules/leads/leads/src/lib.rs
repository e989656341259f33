//! Leads Module
//!
//! Lead intake for immigration-assessment requests: a public submission
//! endpoint and an admin API to list, search, filter, sort, paginate and
//! update submitted leads.
//!
//! ## Public API
//!
//! The public API is defined in the `leads-sdk` crate and re-exported here:
//! - `LeadsClient` - trait for in-process access
//! - `Lead`, `LeadSubmission`, `LeadQuery`, `LeadStatus` - data models
//! - `LeadsError` - error type
//!
//! Build a [`LeadsModule`] from a [`LeadsConfig`] and mount
//! [`LeadsModule::router`], or use [`LeadsModule::client`] directly.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use leads_sdk::{Lead, LeadQuery, LeadStatus, LeadSubmission, LeadsClient, LeadsError};

// === MODULE DEFINITION ===
pub mod module;
pub use module::LeadsModule;

// === LOCAL CLIENT ===
pub mod local_client;

pub use config::{AuthConfig, LeadsConfig};

// === INTERNAL MODULES ===
// Exposed for integration tests; use the SDK types for stable APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

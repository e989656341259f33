//! REST API layer.
//!
//! - `dto` - wire shapes of requests and responses
//! - `form` - multipart decoding into a [`leads_sdk::LeadSubmission`]
//! - `error` - mapping of domain failures to JSON envelopes
//! - `auth` - admin sign-in, sign-out and the session gate
//! - `handlers` - thin adapters from HTTP to the domain service
//! - `routes` - router assembly

pub mod auth;
pub mod dto;
pub mod error;
pub mod form;
pub mod handlers;
pub mod routes;

//! Infrastructure adapters for the domain ports.

pub mod auth;
pub mod resume;
pub mod storage;

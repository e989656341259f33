//! Lead persistence.
//!
//! Only an in-process store exists today; leads live for the lifetime of
//! the server process.

mod memory_repo;

pub use memory_repo::InMemoryLeadStore;

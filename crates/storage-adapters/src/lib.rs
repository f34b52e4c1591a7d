//! # storage-adapters
//!
//! Concrete `ThreadRepository` implementations, selected at compile time by
//! feature and at run time by configuration.

pub mod memory;
#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::InMemoryThreadRepository;
#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteThreadRepository;

//! SQLite storage implementation for Unistock.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the store traits defined in `unistock-core` and the settings
//! reader defined in `unistock-market-data`:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Per-market document collections kept in one `documents` table
//! - Source-priority groupings and runtime settings
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//! core (domain)          market-data (providers)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod documents;
pub mod groupings;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use documents::DocumentRepository;
pub use groupings::GroupingRepository;
pub use settings::SettingsRepository;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from unistock-core for convenience
pub use unistock_core::errors::{DatabaseError, Error, Result};

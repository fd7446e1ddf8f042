//! Database layer
//!
//! This module provides database access for the Newswire API. It supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for larger deployments)
//!
//! The database driver is selected based on configuration. Repositories issue
//! one parameterized SQL statement per operation and surface row-level
//! failures as a tagged [`StoreError`] so nothing downstream inspects
//! driver-specific error fields.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod seed;

pub use error::{StoreError, StoreResult};
pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};

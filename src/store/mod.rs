// Document store — SQLite persistence for the scraped article archive.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever WINNOWER_DB_PATH points
// (defaults to ./winnower.db). Callers outside this module go through the
// DocumentStore trait, not Connection.

pub mod models;
pub mod queries;
pub mod query;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use query::{Condition, Query};
pub use traits::DocumentStore;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (or create) the database and run schema creation.
///
/// This is the main entry point — called by `winnower init` and by any
/// command that needs store access.
pub fn initialize(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing database (fails if it doesn't exist yet).
///
/// Connection-level failures surface as StoreUnavailable: fatal, no retry.
/// The batch operations running on top are safe to re-run from scratch.
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `winnower init` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .map_err(|e| crate::error::PipelineError::StoreUnavailable(e.to_string()))
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

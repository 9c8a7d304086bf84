// Database schema — table creation.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Scraped articles. full_text arrives from the external scraper;
        -- clean_text is derived by the corpus cleaner and is absent until
        -- a record has been cleaned.
        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            web_url TEXT NOT NULL UNIQUE,      -- secondary key from the scrape
            headline TEXT,
            section TEXT,                      -- e.g. 'World', 'Opinion'
            pub_date TEXT,                     -- as scraped, filter-only
            full_text TEXT,
            clean_text TEXT,                   -- normalized tokens, space-joined
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for the incremental-clean query (full_text set, clean_text not)
        CREATE INDEX IF NOT EXISTS idx_documents_clean
            ON documents(clean_text);

        CREATE INDEX IF NOT EXISTS idx_documents_section
            ON documents(section);
        ",
    )
    .context("Failed to create database tables")?;

    Ok(())
}

/// Count the number of user-created tables in the database.
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        assert!(table_count(&conn).unwrap() >= 1);
    }
}

// SqliteStore — rusqlite backend implementing the DocumentStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points — Rust enforces this
// because MutexGuard is !Send.
//
// find and count both fetch rows and apply the structured filter in Rust,
// so the two can never disagree about what matches.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Document, NewDocument};
use super::query::Query;
use super::traits::DocumentStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn find_one(&self, id: i64) -> Result<Option<Document>> {
        let conn = self.conn.lock().await;
        super::queries::get_document(&conn, id)
    }

    async fn find(&self, query: &Query) -> Result<Vec<Document>> {
        let conn = self.conn.lock().await;
        let mut docs = super::queries::all_documents(&conn)?;
        docs.retain(|d| query.matches(d));
        Ok(docs)
    }

    async fn count(&self, query: &Query) -> Result<u64> {
        let docs = self.find(query).await?;
        Ok(docs.len() as u64)
    }

    async fn insert(&self, doc: &NewDocument) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_document(&conn, doc)
    }

    async fn set_clean_text(&self, id: i64, clean_text: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_clean_text(&conn, id, clean_text)
    }

    async fn corpus_counts(&self) -> Result<(i64, i64)> {
        let conn = self.conn.lock().await;
        let total = super::queries::document_count(&conn)?;
        let cleaned = super::queries::cleaned_count(&conn)?;
        Ok((total, cleaned))
    }
}

// DocumentStore trait — backend-agnostic async interface for the archive.
//
// The pipeline depends only on this abstract capability: find-one-by-key,
// find-matching, count-matching, and upsert-by-key. SqliteStore is the one
// implementor; tests use it with an in-memory connection.
//
// All methods are async so a native async backend could sit behind the same
// interface later without touching callers.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Document, NewDocument};
use super::query::Query;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Fetch a single document by primary id.
    async fn find_one(&self, id: i64) -> Result<Option<Document>>;

    /// Fetch all documents matching the filter, in cursor order.
    async fn find(&self, query: &Query) -> Result<Vec<Document>>;

    /// Count documents matching the filter.
    async fn count(&self, query: &Query) -> Result<u64>;

    /// Insert (or re-import) a scraped document; returns its id.
    async fn insert(&self, doc: &NewDocument) -> Result<i64>;

    /// Upsert the derived clean_text for a document, keyed by id.
    async fn set_clean_text(&self, id: i64, clean_text: &str) -> Result<()>;

    /// Total and cleaned document counts, for status reporting.
    async fn corpus_counts(&self) -> Result<(i64, i64)>;
}

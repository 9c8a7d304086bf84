// Database queries — CRUD operations for the documents table.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces. Structured filters are evaluated in Rust (see query.rs), so
// the SQL here stays to simple keyed reads and full scans.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Document, NewDocument};

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        web_url: row.get(1)?,
        headline: row.get(2)?,
        section: row.get(3)?,
        pub_date: row.get(4)?,
        full_text: row.get(5)?,
        clean_text: row.get(6)?,
    })
}

const DOCUMENT_COLUMNS: &str =
    "id, web_url, headline, section, pub_date, full_text, clean_text";

/// Fetch a single document by primary key.
pub fn get_document(conn: &Connection, id: i64) -> Result<Option<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"
    ))?;
    let result = stmt.query_row(params![id], row_to_document).optional()?;
    Ok(result)
}

/// Fetch every document in cursor (rowid) order.
///
/// Row order here is what callers see as "store cursor iteration order" —
/// feature matrices are aligned to it, so it must be stable across the
/// two reads a pipeline run makes.
pub fn all_documents(conn: &Connection) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY id"
    ))?;
    let rows = stmt.query_map([], row_to_document)?;
    let mut docs = Vec::new();
    for row in rows {
        docs.push(row?);
    }
    Ok(docs)
}

/// Insert a scraped document. Returns the store-assigned id.
///
/// Re-importing the same web_url replaces the scraped fields but leaves
/// clean_text alone — the cleaner owns that column.
pub fn insert_document(conn: &Connection, doc: &NewDocument) -> Result<i64> {
    conn.execute(
        "INSERT INTO documents (web_url, headline, section, pub_date, full_text)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(web_url) DO UPDATE SET
            headline = ?2,
            section = ?3,
            pub_date = ?4,
            full_text = ?5",
        params![
            doc.web_url,
            doc.headline,
            doc.section,
            doc.pub_date,
            doc.full_text
        ],
    )?;
    let id = conn.query_row(
        "SELECT id FROM documents WHERE web_url = ?1",
        params![doc.web_url],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Upsert the derived clean_text onto a document, keyed by primary id.
///
/// The original pipeline keyed the full-collection variant of this write by
/// web_url; both paths standardize on id here (see DESIGN.md).
pub fn set_clean_text(conn: &Connection, id: i64, clean_text: &str) -> Result<()> {
    let updated = conn.execute(
        "UPDATE documents SET clean_text = ?2 WHERE id = ?1",
        params![id, clean_text],
    )?;
    if updated == 0 {
        anyhow::bail!("no document with id {id}");
    }
    Ok(())
}

/// Count cleaned documents (clean_text present).
pub fn cleaned_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE clean_text IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Count all documents.
pub fn document_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
    Ok(count)
}

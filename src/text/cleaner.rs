// Corpus cleaner — batch normalization of scraped documents.
//
// Two entry points: clean a specific list of record ids (used alongside an
// active scrape) and clean everything that matches (the batch pass). Both
// write the space-joined token stream back onto the record as clean_text.
//
// Per-record failures — a vanished record, a record with no full_text —
// are logged and skipped. One bad scrape never aborts the batch, and a
// crash mid-batch is safe to resume in the default missing-only mode.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::store::models::Document;
use crate::store::{Condition, DocumentStore, Query};

use super::normalize::Normalizer;

/// Derive clean_text for one record. Failing here is the expected,
/// non-fatal kind of failure — batch callers warn and move on.
fn derive_clean_text(normalizer: &Normalizer, doc: &Document) -> Result<String, PipelineError> {
    let full_text =
        doc.full_text
            .as_deref()
            .ok_or_else(|| PipelineError::NormalizationFailure {
                id: doc.id,
                reason: "record has no full_text".to_string(),
            })?;
    Ok(normalizer.clean_join(full_text))
}

/// Clean the documents named by `ids`, upserting clean_text keyed by id.
///
/// Returns the number of records actually cleaned.
pub async fn clean_records(
    store: &dyn DocumentStore,
    normalizer: &Normalizer,
    ids: &[i64],
    verbose: bool,
) -> Result<usize> {
    let mut cleaned = 0;
    for (i, &id) in ids.iter().enumerate() {
        if verbose && (i + 1) % 100 == 0 {
            info!(progress = i + 1, total = ids.len(), "cleaning documents");
        }
        let doc = match store.find_one(id).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                warn!(id, "record not found, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };
        let clean = match derive_clean_text(normalizer, &doc) {
            Ok(clean) => clean,
            Err(e) => {
                warn!(id, error = %e, "skipping record");
                continue;
            }
        };
        store.set_clean_text(id, &clean).await?;
        cleaned += 1;
    }
    Ok(cleaned)
}

/// Clean every document with a non-empty full_text.
///
/// By default only documents still lacking clean_text are processed, so
/// repeated runs are incremental and idempotent. `overwrite` reprocesses
/// everything. Returns the number of records cleaned.
pub async fn clean_all(
    store: &dyn DocumentStore,
    normalizer: &Normalizer,
    overwrite: bool,
    verbose: bool,
) -> Result<usize> {
    let mut query = Query::new()
        .with("full_text", Condition::Exists(true))
        .with("full_text", Condition::NotEquals(json!("")));
    if !overwrite {
        query = query.with("clean_text", Condition::Exists(false));
    }

    let total = store.count(&query).await?;
    println!("Cleaning {total} documents...");

    let pb = if verbose {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Cleaning [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let mut cleaned = 0;
    for doc in store.find(&query).await? {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        // full_text is guaranteed non-empty by the query, but the record may
        // have changed under us — treat a missing field like any bad record.
        let clean = match derive_clean_text(normalizer, &doc) {
            Ok(clean) => clean,
            Err(e) => {
                warn!(id = doc.id, error = %e, "skipping record");
                continue;
            }
        };
        if let Err(e) = store.set_clean_text(doc.id, &clean).await {
            warn!(id = doc.id, error = %e, "failed to store clean_text, skipping");
            continue;
        }
        cleaned += 1;
    }

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    info!(cleaned, overwrite, "corpus cleaning finished");
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::NewDocument;
    use crate::store::schema::create_tables;
    use crate::store::sqlite::SqliteStore;
    use rusqlite::Connection;

    fn test_store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteStore::new(conn)
    }

    async fn seed(store: &SqliteStore, url: &str, text: Option<&str>) -> i64 {
        store
            .insert(&NewDocument {
                web_url: url.to_string(),
                headline: None,
                section: None,
                pub_date: None,
                full_text: text.map(String::from),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn clean_records_writes_clean_text() {
        let store = test_store();
        let n = Normalizer::new();
        let id = seed(&store, "u1", Some("THE CAT sat. THE dog ran!")).await;

        let cleaned = clean_records(&store, &n, &[id], false).await.unwrap();
        assert_eq!(cleaned, 1);
        let doc = store.find_one(id).await.unwrap().unwrap();
        assert_eq!(doc.clean_text.as_deref(), Some("cat sat dog ran"));
    }

    #[tokio::test]
    async fn clean_records_skips_bad_records() {
        let store = test_store();
        let n = Normalizer::new();
        let good = seed(&store, "u1", Some("some real text here")).await;
        let textless = seed(&store, "u2", None).await;

        // A missing id and a textless record are skipped, not fatal
        let cleaned = clean_records(&store, &n, &[good, 9999, textless], false)
            .await
            .unwrap();
        assert_eq!(cleaned, 1);
        assert!(store
            .find_one(textless)
            .await
            .unwrap()
            .unwrap()
            .clean_text
            .is_none());
    }

    #[tokio::test]
    async fn clean_all_is_incremental_by_default() {
        let store = test_store();
        let n = Normalizer::new();
        for i in 0..10 {
            seed(&store, &format!("u{i}"), Some("fresh text")).await;
        }
        // Pre-clean 3 of the 10
        for id in 1..=3 {
            store.set_clean_text(id, "already cleaned").await.unwrap();
        }

        let cleaned = clean_all(&store, &n, false, false).await.unwrap();
        assert_eq!(cleaned, 7);

        // The pre-cleaned records kept their old clean_text
        let doc = store.find_one(1).await.unwrap().unwrap();
        assert_eq!(doc.clean_text.as_deref(), Some("already cleaned"));
    }

    #[tokio::test]
    async fn clean_all_overwrite_reprocesses() {
        let store = test_store();
        let n = Normalizer::new();
        let id = seed(&store, "u1", Some("Grand Jury Testimony")).await;
        store.set_clean_text(id, "stale").await.unwrap();

        let cleaned = clean_all(&store, &n, true, false).await.unwrap();
        assert_eq!(cleaned, 1);
        let doc = store.find_one(id).await.unwrap().unwrap();
        assert_eq!(doc.clean_text.as_deref(), Some("grand jury testimony"));
    }

    #[tokio::test]
    async fn clean_all_skips_empty_full_text() {
        let store = test_store();
        let n = Normalizer::new();
        seed(&store, "u1", Some("")).await;
        seed(&store, "u2", None).await;
        let cleaned = clean_all(&store, &n, false, false).await.unwrap();
        assert_eq!(cleaned, 0);
    }
}

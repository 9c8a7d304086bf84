// System status display — DB stats and cleaning progress.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::store::DocumentStore;

/// Display archive status to the terminal.
pub async fn show(store: &Arc<dyn DocumentStore>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `winnower init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let (total, cleaned) = store.corpus_counts().await?;
    println!("Documents: {} total", total);
    println!("Cleaned: {} ({} remaining)", cleaned, total - cleaned);

    if total == 0 {
        println!("\nRun `winnower import <file.jsonl>` to load scraped documents.");
    } else if cleaned < total {
        println!("\nRun `winnower clean` to normalize the remaining documents.");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

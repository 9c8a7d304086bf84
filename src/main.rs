use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::warn;

use winnower::config::Config;
use winnower::curate::{curate_topics, StdinPrompter};
use winnower::pipeline::{run_discovery, run_refit, DiscoveryParams, RefitParams};
use winnower::store::models::NewDocument;
use winnower::store::sqlite::SqliteStore;
use winnower::store::{Condition, DocumentStore, Query};
use winnower::text::cleaner;
use winnower::text::Normalizer;
use winnower::topics::{score_relevance, RelevanceSpec};

/// Winnower: topic discovery and corpus curation for scraped news archives.
///
/// Fits a broad NMF topic model over the cleaned corpus, lets you name and
/// keep/discard the topics it finds, then refits a sharper model over the
/// documents your kept topics say are relevant.
#[derive(Parser)]
#[command(name = "winnower", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Import scraped documents from a JSON-lines file
    Import {
        /// Path to the .jsonl file (one document object per line)
        file: PathBuf,
    },

    /// Normalize full_text into clean_text for documents in the archive
    Clean {
        /// Clean only these document ids (default: all matching documents)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,

        /// Reprocess documents that already have clean_text
        #[arg(long)]
        overwrite: bool,

        /// Show per-document progress
        #[arg(long)]
        verbose: bool,
    },

    /// Run the discovery pipeline: broad topic model, interactive curation,
    /// relevance filtering, and the final refit model
    Discover {
        /// Restrict to documents in this section
        #[arg(long)]
        section: Option<String>,

        /// Topic count for the broad discovery pass
        #[arg(long, default_value = "30")]
        topics: usize,

        /// Topic count for the post-curation refit
        #[arg(long, default_value = "20")]
        refit_topics: usize,

        /// Top terms shown per topic
        #[arg(long, default_value = "30")]
        top_words: usize,

        /// Minimum relevance score a document needs to survive into the refit
        #[arg(long, default_value = "0.1")]
        threshold: f64,

        /// Print the discovery topics and stop (no curation, no refit)
        #[arg(long)]
        no_curate: bool,
    },

    /// Show archive status (document counts, cleaning progress)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("winnower=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let config = Config::load()?;
            let conn = winnower::store::initialize(&config.db_path)?;
            let store = SqliteStore::new(conn);
            let tables = store.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {tables}");
            println!("\nNext step: winnower import <scrape.jsonl>");
        }

        Commands::Import { file } => {
            let config = Config::load()?;
            let store = open_store(&config)?;

            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let mut imported = 0usize;
            let mut skipped = 0usize;
            for (line_no, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let doc: NewDocument = match serde_json::from_str(line) {
                    Ok(doc) => doc,
                    Err(e) => {
                        warn!(line = line_no + 1, error = %e, "skipping malformed line");
                        skipped += 1;
                        continue;
                    }
                };
                store.insert(&doc).await?;
                imported += 1;
            }

            println!("Imported {imported} documents ({skipped} skipped)");
            println!("\nNext step: winnower clean");
        }

        Commands::Clean {
            ids,
            overwrite,
            verbose,
        } => {
            let config = Config::load()?;
            let store = open_store(&config)?;
            let normalizer = Normalizer::new();

            let cleaned = if ids.is_empty() {
                cleaner::clean_all(store.as_ref(), &normalizer, overwrite, verbose).await?
            } else {
                cleaner::clean_records(store.as_ref(), &normalizer, &ids, verbose).await?
            };
            println!("Cleaned {cleaned} documents");
        }

        Commands::Discover {
            section,
            topics,
            refit_topics,
            top_words,
            threshold,
            no_curate,
        } => {
            let config = Config::load()?;
            let store = open_store(&config)?;

            let mut query = Query::new();
            if let Some(section) = section {
                query = query.with("section", Condition::Equals(serde_json::json!(section)));
            }

            let discovery = DiscoveryParams {
                n_topics: topics,
                top_words,
                seed: config.nmf_seed,
                ..DiscoveryParams::default()
            };

            println!("Fitting broad discovery model...\n");
            let (w, ids, summaries) = run_discovery(store.as_ref(), &query, &discovery).await?;
            println!(
                "Modeled {} documents into {} topics.",
                ids.len(),
                summaries.len()
            );

            if no_curate {
                return Ok(());
            }

            println!(
                "\n{}",
                "Review each topic: give it a name, then decide whether it marks relevant documents. Enter Q to stop."
                    .bold()
            );
            let mut prompter = StdinPrompter;
            let verdicts = curate_topics(&summaries, &mut prompter)?;

            let kept: usize = verdicts
                .iter()
                .flatten()
                .filter(|(_, keep)| *keep)
                .count();
            if kept == 0 {
                println!("No topics kept — skipping the refit pass.");
                return Ok(());
            }

            // Kept topics weigh 1.0, everything else (discarded or never
            // reached) weighs 0.0.
            let spec = RelevanceSpec::Named(
                verdicts
                    .iter()
                    .enumerate()
                    .map(|(i, v)| match v {
                        Some((name, keep)) => {
                            (i, (name.clone(), if *keep { 1.0 } else { 0.0 }))
                        }
                        None => (i, (String::new(), 0.0)),
                    })
                    .collect(),
            );
            let relevance = score_relevance(&w, &ids, spec)?;

            println!("\nRefitting over documents with relevance >= {threshold}...\n");
            let refit = RefitParams {
                n_topics: refit_topics,
                top_words,
                seed: config.nmf_seed,
                ..RefitParams::default()
            };
            let (_, _, final_summaries) =
                run_refit(store.as_ref(), &query, &relevance, threshold, &refit).await?;

            println!(
                "{}",
                format!(
                    "Final model: {} topics over the curated corpus. Review above.",
                    final_summaries.len()
                )
                .bold()
            );
        }

        Commands::Status => {
            let config = Config::load()?;
            let store = open_store(&config)?;
            winnower::status::show(&store, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Open the configured database behind the DocumentStore trait.
fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    let conn = winnower::store::open(&config.db_path)?;
    Ok(Arc::new(SqliteStore::new(conn)))
}

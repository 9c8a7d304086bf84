// Initial discovery pipeline: TF-IDF -> NMF -> labels -> topic report.

use anyhow::Result;
use ndarray::Array2;
use tracing::info;

use crate::output::terminal;
use crate::store::{DocumentStore, Query};
use crate::topics::features::{extract_features, TfidfParams};
use crate::topics::labels::{label_topics, TopicSummary};
use crate::topics::nmf::factorize;

use super::DiscoveryParams;

/// Fit the broad exploratory topic model over everything matching `query`
/// and print the topics for human review.
///
/// Returns the document-topic matrix, the ids aligned to its rows, and the
/// per-topic term summaries — exactly what curation and relevance scoring
/// need next. Nothing is persisted.
pub async fn run_discovery(
    store: &dyn DocumentStore,
    query: &Query,
    params: &DiscoveryParams,
) -> Result<(Array2<f64>, Vec<i64>, Vec<TopicSummary>)> {
    let tfidf = TfidfParams {
        max_features: params.max_features,
        ngram_range: params.ngram_range,
        max_df: params.max_df,
    };

    let (x, vectorizer, ids) = extract_features(store, query, &tfidf).await?;
    info!(
        documents = ids.len(),
        vocabulary = vectorizer.feature_names().len(),
        n_topics = params.n_topics,
        "running discovery pass"
    );

    let (w, h) = factorize(&x, params.n_topics, params.seed)?;
    let summaries = label_topics(&vectorizer, &h, params.top_words);

    terminal::print_topics(&summaries);

    Ok((w, ids, summaries))
}

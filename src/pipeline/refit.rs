// Final refit pipeline: relevance-filter the corpus, then fit the sharper
// post-curation model over the documents a human judged relevant.

use std::collections::HashMap;

use anyhow::Result;
use ndarray::Array2;
use tracing::info;

use crate::error::PipelineError;
use crate::output::terminal;
use crate::store::{Condition, DocumentStore, Query};
use crate::topics::features::{TfidfParams, TfidfVectorizer};
use crate::topics::labels::{label_topics, TopicSummary};
use crate::topics::nmf::factorize;

use super::RefitParams;

/// Join per-document relevance scores to the queried corpus, drop documents
/// below `threshold`, and refit TF-IDF + NMF over the survivors.
///
/// `relevance` pairs come from `score_relevance` over the discovery-pass
/// matrix; documents matching the query but absent from `relevance` are
/// dropped (no score means no evidence of relevance).
pub async fn run_refit(
    store: &dyn DocumentStore,
    query: &Query,
    relevance: &[(i64, f64)],
    threshold: f64,
    params: &RefitParams,
) -> Result<(TfidfVectorizer, Array2<f64>, Vec<TopicSummary>)> {
    let query = query
        .clone()
        .with_default("clean_text", Condition::Exists(true));

    let scores: HashMap<i64, f64> = relevance.iter().cloned().collect();

    let docs = store.find(&query).await?;
    let total = docs.len();

    let texts: Vec<String> = docs
        .into_iter()
        .filter(|d| scores.get(&d.id).is_some_and(|&s| s >= threshold))
        .filter_map(|d| d.clean_text)
        .filter(|t| !t.is_empty())
        .collect();

    info!(
        matched = total,
        retained = texts.len(),
        threshold,
        "relevance filter applied"
    );

    if texts.is_empty() {
        return Err(PipelineError::EmptyCorpus.into());
    }

    let tfidf = TfidfParams {
        max_features: params.max_features,
        ngram_range: params.ngram_range,
        max_df: params.max_df,
    };
    let (x, vectorizer) = TfidfVectorizer::fit(&texts, &tfidf)?;
    let (_, h) = factorize(&x, params.n_topics, params.seed)?;
    let summaries = label_topics(&vectorizer, &h, params.top_words);

    terminal::print_topics(&summaries);

    Ok((vectorizer, h, summaries))
}

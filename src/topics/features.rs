// TF-IDF feature extraction over the cleaned corpus.
//
// Builds a document-by-term weighted frequency matrix: raw n-gram counts,
// discounted by smoothed inverse document frequency, L2-normalized per row.
// The fitted vectorizer keeps the vocabulary so matrix columns stay
// interpretable downstream (the labeler needs the term names).
//
// Input text is expected to already be normalized (clean_text), so
// tokenization here is a plain whitespace split.

use std::collections::HashMap;

use anyhow::Result;
use ndarray::Array2;
use tracing::info;

use crate::error::PipelineError;
use crate::store::{Condition, DocumentStore, Query};

/// Weighting parameters for a vectorizer fit.
#[derive(Debug, Clone)]
pub struct TfidfParams {
    /// Vocabulary cap. The most frequent terms across the corpus win;
    /// ties break on the term string.
    pub max_features: usize,
    /// Inclusive n-gram span, e.g. (1, 3) counts unigrams through trigrams.
    pub ngram_range: (usize, usize),
    /// Document-frequency ceiling: terms appearing in more than this
    /// fraction of documents are dropped as too common to discriminate.
    pub max_df: f64,
}

/// Fitted vectorizer state — vocabulary and idf weights bound to one
/// feature matrix.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    feature_names: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit over a corpus and return the weighted feature matrix alongside
    /// the vectorizer state. Row i of the matrix corresponds to `texts[i]`.
    pub fn fit(texts: &[String], params: &TfidfParams) -> Result<(Array2<f64>, Self)> {
        if texts.is_empty() {
            return Err(PipelineError::EmptyCorpus.into());
        }
        let (ngram_min, ngram_max) = params.ngram_range;
        if ngram_min == 0 || ngram_min > ngram_max {
            anyhow::bail!("invalid ngram range ({ngram_min}, {ngram_max})");
        }

        // Per-document term counts, with n-gram expansion
        let doc_counts: Vec<HashMap<String, f64>> = texts
            .iter()
            .map(|t| count_ngrams(t, ngram_min, ngram_max))
            .collect();

        // Corpus-wide document frequency and total count per term
        let mut df: HashMap<&str, usize> = HashMap::new();
        let mut corpus_count: HashMap<&str, f64> = HashMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                *df.entry(term.as_str()).or_default() += 1;
                *corpus_count.entry(term.as_str()).or_default() += count;
            }
        }

        let n_docs = texts.len();

        // Apply the document-frequency ceiling, then truncate to the
        // max_features most frequent survivors.
        let mut candidates: Vec<&str> = df
            .iter()
            .filter(|(_, &d)| (d as f64) / (n_docs as f64) <= params.max_df)
            .map(|(&term, _)| term)
            .collect();
        candidates.sort_by(|a, b| {
            corpus_count[b]
                .partial_cmp(&corpus_count[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(b))
        });
        candidates.truncate(params.max_features);
        // Vocabulary order is alphabetical so column layout is independent
        // of corpus frequency ties
        candidates.sort_unstable();

        if candidates.is_empty() {
            anyhow::bail!(
                "vocabulary is empty after filtering — max_df {} may be too low for {} documents",
                params.max_df,
                n_docs
            );
        }

        let feature_names: Vec<String> = candidates.iter().map(|t| t.to_string()).collect();
        let vocab_index: HashMap<&str, usize> = candidates
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, i))
            .collect();

        // Smoothed idf, as if one extra document contained every term
        let idf: Vec<f64> = candidates
            .iter()
            .map(|t| ((1.0 + n_docs as f64) / (1.0 + df[t] as f64)).ln() + 1.0)
            .collect();

        // Weighted counts, L2-normalized per document
        let mut matrix = Array2::<f64>::zeros((n_docs, feature_names.len()));
        for (row, counts) in doc_counts.iter().enumerate() {
            for (term, count) in counts {
                if let Some(&col) = vocab_index.get(term.as_str()) {
                    matrix[[row, col]] = count * idf[col];
                }
            }
            let norm = matrix.row(row).mapv(|v| v * v).sum().sqrt();
            if norm > 0.0 {
                matrix.row_mut(row).mapv_inplace(|v| v / norm);
            }
        }

        info!(
            documents = n_docs,
            vocabulary = feature_names.len(),
            "fitted TF-IDF vectorizer"
        );

        Ok((
            matrix,
            Self {
                feature_names,
                idf,
            },
        ))
    }

    /// Term names aligned to matrix columns.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Fitted idf weight per vocabulary term.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}

/// Count n-grams of a whitespace-tokenized document. N-grams are joined
/// with single spaces, matching the clean_text convention.
fn count_ngrams(text: &str, ngram_min: usize, ngram_max: usize) -> HashMap<String, f64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut counts = HashMap::new();
    for n in ngram_min..=ngram_max {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_default() += 1.0;
        }
    }
    counts
}

/// Build the feature matrix over documents matching `query`.
///
/// A `clean_text exists` condition is merged in unconditionally, so
/// uncleaned documents never reach the vectorizer. Returns the matrix,
/// the fitted vectorizer, and the document ids aligned to matrix rows.
/// Row order is store cursor order — callers must not assume anything
/// beyond row/id alignment.
pub async fn extract_features(
    store: &dyn DocumentStore,
    query: &Query,
    params: &TfidfParams,
) -> Result<(Array2<f64>, TfidfVectorizer, Vec<i64>)> {
    let query = query
        .clone()
        .with_default("clean_text", Condition::Exists(true));

    let docs = store.find(&query).await?;

    let mut ids = Vec::with_capacity(docs.len());
    let mut texts = Vec::with_capacity(docs.len());
    for doc in docs {
        // A document whose every token was a stopword has an empty
        // clean_text; it carries no features and would be an all-zero row.
        match doc.clean_text {
            Some(clean) if !clean.is_empty() => {
                ids.push(doc.id);
                texts.push(clean);
            }
            _ => {}
        }
    }

    if texts.is_empty() {
        return Err(PipelineError::EmptyCorpus.into());
    }

    let (matrix, vectorizer) = TfidfVectorizer::fit(&texts, params)?;
    Ok((matrix, vectorizer, ids))
}

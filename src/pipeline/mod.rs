// Pipeline orchestration — the two passes of the discovery/curation loop.
//
// The discovery pass fits a deliberately broad model over everything that
// matches the query; the refit pass narrows the corpus by human-validated
// relevance and fits a sharper model over what survives.

pub mod discover;
pub mod refit;

pub use discover::run_discovery;
pub use refit::run_refit;

/// Parameters for the initial broad pass. Defaults favor breadth — a big
/// vocabulary, up to trigrams, and more topics than the corpus probably
/// has, so nothing interesting gets folded into a neighbor early.
#[derive(Debug, Clone)]
pub struct DiscoveryParams {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub max_df: f64,
    pub n_topics: usize,
    pub top_words: usize,
    pub seed: Option<u64>,
}

impl Default for DiscoveryParams {
    fn default() -> Self {
        Self {
            max_features: 20_000,
            ngram_range: (1, 3),
            max_df: 0.8,
            n_topics: 30,
            top_words: 30,
            seed: None,
        }
    }
}

/// Parameters for the post-curation refit over the relevance-filtered
/// subset. The vocabulary grows and the topic count shrinks: fewer, better
/// documents support finer terms but fewer distinct themes.
#[derive(Debug, Clone)]
pub struct RefitParams {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub max_df: f64,
    pub n_topics: usize,
    pub top_words: usize,
    pub seed: Option<u64>,
}

impl Default for RefitParams {
    fn default() -> Self {
        Self {
            max_features: 50_000,
            ngram_range: (1, 3),
            max_df: 0.8,
            n_topics: 20,
            top_words: 30,
            seed: None,
        }
    }
}

// Topic labeling — connects topic-term weights back to actual terms.
//
// For each topic row of H, the top-N terms by weight are retained and
// their weights renormalized to percentages of the retained mass, which
// is what the human review surface displays.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::features::TfidfVectorizer;

/// One topic's most important terms, as term/percentage pairs in
/// descending order. Percentages sum to 100 over the retained terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub terms: Vec<(String, f64)>,
}

impl TopicSummary {
    /// The percentage assigned to a term, if it was retained.
    pub fn percent_for(&self, term: &str) -> Option<f64> {
        self.terms
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, pct)| *pct)
    }
}

/// Extract the top `top_n` terms of every topic in `h`, weight-normalized
/// to percentages. Output order = topic row order.
///
/// Ties in weight keep vocabulary (column) order — arbitrary but
/// deterministic given a fixed vocabulary.
pub fn label_topics(
    vectorizer: &TfidfVectorizer,
    h: &Array2<f64>,
    top_n: usize,
) -> Vec<TopicSummary> {
    let names = vectorizer.feature_names();
    let mut summaries = Vec::with_capacity(h.nrows());

    for row in h.rows() {
        let mut ranked: Vec<(usize, f64)> = row.iter().cloned().enumerate().collect();
        // Stable sort: equal weights stay in vocabulary order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_n);
        ranked.retain(|(_, weight)| *weight > 0.0);

        let total: f64 = ranked.iter().map(|(_, w)| w).sum();
        let terms = if total > 0.0 {
            ranked
                .into_iter()
                .map(|(col, weight)| (names[col].clone(), weight / total * 100.0))
                .collect()
        } else {
            Vec::new()
        };

        summaries.push(TopicSummary { terms });
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::features::TfidfParams;
    use ndarray::array;

    fn fitted_vectorizer() -> TfidfVectorizer {
        let texts = vec![
            "alpha beta".to_string(),
            "gamma delta".to_string(),
        ];
        let params = TfidfParams {
            max_features: 10,
            ngram_range: (1, 1),
            max_df: 1.0,
        };
        let (_, vec) = TfidfVectorizer::fit(&texts, &params).unwrap();
        // Vocabulary is alphabetical: alpha, beta, delta, gamma
        assert_eq!(
            vec.feature_names(),
            &["alpha", "beta", "delta", "gamma"]
        );
        vec
    }

    #[test]
    fn percentages_sum_to_100() {
        let vec = fitted_vectorizer();
        let h = array![[4.0, 3.0, 2.0, 1.0], [0.0, 1.0, 1.0, 2.0]];
        let summaries = label_topics(&vec, &h, 3);
        assert_eq!(summaries.len(), 2);
        for s in &summaries {
            let total: f64 = s.terms.iter().map(|(_, pct)| pct).sum();
            assert!((total - 100.0).abs() < 1e-9, "sum was {total}");
        }
    }

    #[test]
    fn top_terms_in_descending_order() {
        let vec = fitted_vectorizer();
        let h = array![[1.0, 4.0, 2.0, 3.0]];
        let summaries = label_topics(&vec, &h, 3);
        let terms: Vec<&str> = summaries[0].terms.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(terms, vec!["beta", "gamma", "delta"]);
        // 4/(4+3+2), 3/9, 2/9 of the retained mass
        assert!((summaries[0].percent_for("beta").unwrap() - 400.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn zero_weight_terms_are_not_retained() {
        let vec = fitted_vectorizer();
        let h = array![[2.0, 0.0, 0.0, 0.0]];
        let summaries = label_topics(&vec, &h, 4);
        assert_eq!(summaries[0].terms.len(), 1);
        assert!((summaries[0].percent_for("alpha").unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_topic_yields_empty_summary() {
        let vec = fitted_vectorizer();
        let h = array![[0.0, 0.0, 0.0, 0.0]];
        let summaries = label_topics(&vec, &h, 4);
        assert!(summaries[0].terms.is_empty());
    }

    #[test]
    fn ties_keep_vocabulary_order() {
        let vec = fitted_vectorizer();
        let h = array![[1.0, 1.0, 1.0, 1.0]];
        let summaries = label_topics(&vec, &h, 2);
        let terms: Vec<&str> = summaries[0].terms.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(terms, vec!["alpha", "beta"]);
    }
}

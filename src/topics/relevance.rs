// Relevance scoring — projects the document-topic matrix against
// human-assigned topic weights to get one relevance scalar per document.

use std::collections::BTreeMap;

use anyhow::Result;
use ndarray::{Array1, Array2};

use crate::error::PipelineError;

/// Human judgment of which topics matter and how much.
///
/// Both shapes convert to the same canonical weight vector; `Named` also
/// carries the topic names assigned during curation, which scoring ignores.
#[derive(Debug, Clone)]
pub enum RelevanceSpec {
    /// Dense weight vector, index-aligned to topic matrix columns.
    Weighted(Vec<f64>),
    /// Topic index -> (name, weight). Iteration order is index order.
    Named(BTreeMap<usize, (String, f64)>),
}

impl RelevanceSpec {
    /// Convert to a canonical weight vector, validating against the topic
    /// count before any matrix product happens.
    pub fn into_weights(self, n_topics: usize) -> Result<Array1<f64>, PipelineError> {
        match self {
            RelevanceSpec::Weighted(weights) => {
                if weights.len() != n_topics {
                    return Err(PipelineError::DimensionMismatch {
                        expected: n_topics,
                        got: weights.len(),
                    });
                }
                Ok(Array1::from(weights))
            }
            RelevanceSpec::Named(map) => {
                if map.len() != n_topics {
                    return Err(PipelineError::DimensionMismatch {
                        expected: n_topics,
                        got: map.len(),
                    });
                }
                let mut weights = Array1::zeros(n_topics);
                for (index, (_name, weight)) in map {
                    if index >= n_topics {
                        return Err(PipelineError::DimensionMismatch {
                            expected: n_topics,
                            got: index + 1,
                        });
                    }
                    weights[index] = weight;
                }
                Ok(weights)
            }
        }
    }
}

/// Score every document's relevance as W . weights, paired with its id.
///
/// Output pairs preserve W's row order and count: for N rows, exactly N
/// pairs, with pair i belonging to `ids[i]`.
pub fn score_relevance(
    w: &Array2<f64>,
    ids: &[i64],
    spec: RelevanceSpec,
) -> Result<Vec<(i64, f64)>> {
    if ids.len() != w.nrows() {
        anyhow::bail!(
            "id list has {} entries but the document-topic matrix has {} rows",
            ids.len(),
            w.nrows()
        );
    }

    let weights = spec.into_weights(w.ncols())?;
    let scores = w.dot(&weights);

    Ok(ids.iter().cloned().zip(scores.iter().cloned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn named_spec_worked_example() {
        // {0: ("topicA", 1.0), 1: ("topicB", 0.0)} against W = [[.2,.8],[.9,.1]]
        let w = array![[0.2, 0.8], [0.9, 0.1]];
        let mut map = BTreeMap::new();
        map.insert(0, ("topicA".to_string(), 1.0));
        map.insert(1, ("topicB".to_string(), 0.0));

        let pairs = score_relevance(&w, &[10, 20], RelevanceSpec::Named(map)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, 10);
        assert!((pairs[0].1 - 0.2).abs() < 1e-12);
        assert_eq!(pairs[1].0, 20);
        assert!((pairs[1].1 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn weighted_spec_matches_matrix_product() {
        let w = array![[1.0, 0.0], [0.5, 0.5], [0.0, 2.0]];
        let pairs =
            score_relevance(&w, &[1, 2, 3], RelevanceSpec::Weighted(vec![2.0, 1.0])).unwrap();
        let scores: Vec<f64> = pairs.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![2.0, 1.5, 2.0]);
    }

    #[test]
    fn wrong_length_vector_is_rejected() {
        let w = array![[0.2, 0.8], [0.9, 0.1]];
        let err = score_relevance(&w, &[10, 20], RelevanceSpec::Weighted(vec![1.0]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn named_spec_with_out_of_range_index_is_rejected() {
        let w = array![[0.2, 0.8], [0.9, 0.1]];
        let mut map = BTreeMap::new();
        map.insert(0, ("a".to_string(), 1.0));
        map.insert(5, ("b".to_string(), 1.0));
        let err = score_relevance(&w, &[10, 20], RelevanceSpec::Named(map)).unwrap_err();
        assert!(err.downcast_ref::<PipelineError>().is_some());
    }

    #[test]
    fn id_row_misalignment_is_rejected() {
        let w = array![[0.2, 0.8]];
        assert!(score_relevance(&w, &[1, 2], RelevanceSpec::Weighted(vec![1.0, 0.0])).is_err());
    }
}

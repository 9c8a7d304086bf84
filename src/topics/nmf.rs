// Non-negative matrix factorization by multiplicative updates.
//
// Factors the feature matrix X (docs x terms) into W (docs x topics) and
// H (topics x terms), both non-negative, using the Lee-Seung update rules.
// Initialization is random uniform, so two runs only agree when a seed is
// fixed — the pipeline threads WINNOWER_NMF_SEED through to here.

use anyhow::Result;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::PipelineError;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE_TOL: f64 = 1e-4;
// Keeps denominators and initial factors away from exact zero, where the
// multiplicative update would stall permanently.
const EPS: f64 = 1e-9;

/// Factor `x` into (document-topic, topic-term) matrices with `n_topics`
/// as the shared inner dimension.
pub fn factorize(
    x: &Array2<f64>,
    n_topics: usize,
    seed: Option<u64>,
) -> Result<(Array2<f64>, Array2<f64>)> {
    let (n_docs, n_terms) = x.dim();
    if n_docs == 0 || n_terms == 0 {
        return Err(PipelineError::EmptyCorpus.into());
    }
    if n_topics == 0 || n_topics > n_docs.min(n_terms) {
        anyhow::bail!(
            "n_topics must be between 1 and min(docs, terms) = {}, got {}",
            n_docs.min(n_terms),
            n_topics
        );
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut w = Array2::from_shape_fn((n_docs, n_topics), |_| rng.random::<f64>() + EPS);
    let mut h = Array2::from_shape_fn((n_topics, n_terms), |_| rng.random::<f64>() + EPS);

    let mut previous_err = f64::INFINITY;
    for iteration in 0..MAX_ITERATIONS {
        // H <- H * (W^T X) / (W^T W H)
        let numer_h = w.t().dot(x);
        let denom_h = w.t().dot(&w).dot(&h) + EPS;
        h = h * (numer_h / denom_h);

        // W <- W * (X H^T) / (W H H^T)
        let numer_w = x.dot(&h.t());
        let denom_w = w.dot(&h).dot(&h.t()) + EPS;
        w = w * (numer_w / denom_w);

        if (iteration + 1) % 10 == 0 {
            let err = reconstruction_error(x, &w, &h);
            debug!(iteration = iteration + 1, err, "NMF progress");
            if previous_err.is_finite()
                && (previous_err - err).abs() <= CONVERGENCE_TOL * previous_err.max(EPS)
            {
                info!(iterations = iteration + 1, err, "NMF converged");
                return Ok((w, h));
            }
            previous_err = err;
        }
    }

    info!(
        iterations = MAX_ITERATIONS,
        err = reconstruction_error(x, &w, &h),
        "NMF stopped at iteration cap"
    );
    Ok((w, h))
}

/// Frobenius norm of X - WH.
fn reconstruction_error(x: &Array2<f64>, w: &Array2<f64>, h: &Array2<f64>) -> f64 {
    (x - &w.dot(h)).mapv(|v| v * v).sum().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn block_matrix() -> Array2<f64> {
        // Two clearly separated term blocks
        array![
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 0.8, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 0.9, 1.0],
        ]
    }

    #[test]
    fn shapes_are_docs_by_topics_and_topics_by_terms() {
        let x = block_matrix();
        let (w, h) = factorize(&x, 2, Some(42)).unwrap();
        assert_eq!(w.dim(), (4, 2));
        assert_eq!(h.dim(), (2, 4));
    }

    #[test]
    fn factors_are_non_negative() {
        let x = block_matrix();
        let (w, h) = factorize(&x, 2, Some(42)).unwrap();
        assert!(w.iter().all(|&v| v >= 0.0));
        assert!(h.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn reconstruction_is_close_for_low_rank_input() {
        let x = block_matrix();
        let (w, h) = factorize(&x, 2, Some(7)).unwrap();
        let err = reconstruction_error(&x, &w, &h);
        assert!(err < 0.2, "reconstruction error too high: {err}");
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let x = block_matrix();
        let (w1, h1) = factorize(&x, 2, Some(99)).unwrap();
        let (w2, h2) = factorize(&x, 2, Some(99)).unwrap();
        assert_eq!(w1, w2);
        assert_eq!(h1, h2);
    }

    #[test]
    fn rejects_bad_topic_counts() {
        let x = block_matrix();
        assert!(factorize(&x, 0, Some(1)).is_err());
        assert!(factorize(&x, 5, Some(1)).is_err());
    }

    #[test]
    fn rejects_empty_matrix() {
        let x = Array2::<f64>::zeros((0, 4));
        let err = factorize(&x, 2, Some(1)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::EmptyCorpus)
        ));
    }
}

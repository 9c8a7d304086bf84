// Pipeline error kinds.
//
// Per-record cleaning failures are warnings, not errors — they never reach
// this type. Everything here is fatal for the pipeline run that hit it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A record could not be normalized (missing or malformed text).
    /// Surfaced only when a caller asks for a single specific record;
    /// batch cleaning logs and skips instead.
    #[error("cannot normalize record {id}: {reason}")]
    NormalizationFailure { id: i64, reason: String },

    /// A relevance weight vector does not match the topic count of the
    /// document-topic matrix it is being applied to.
    #[error("relevance spec has {got} weights but the model has {expected} topics")]
    DimensionMismatch { expected: usize, got: usize },

    /// The document store could not be reached or a query failed.
    #[error("document store error: {0}")]
    StoreUnavailable(String),

    /// Feature extraction matched zero documents; factorizing an empty
    /// matrix is undefined, so the pipeline stops here.
    #[error("no documents matched the query — nothing to model")]
    EmptyCorpus,
}

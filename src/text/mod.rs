// Text subsystem — normalization and batch corpus cleaning.

pub mod cleaner;
pub mod normalize;

pub use normalize::Normalizer;

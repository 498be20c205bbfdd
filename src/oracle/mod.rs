//! Pairwise term similarity providers.

use thiserror::Error;

pub mod wordnet;

pub use wordnet::WordnetOracle;

/// Factor applied to every non-identity taxonomy score. Identical terms
/// short-circuit to 1.0 and are not scaled.
pub const PAIR_SCORE_SCALE: f64 = 0.5;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum OracleError {
    /// The taxonomy could not be loaded at start.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    /// The taxonomy engine faulted on a specific pair.
    #[error("similarity computation failed: {0}")]
    Computation(String),
}

pub type OracleResult<T> = Result<T, OracleError>;

/// Similarity between two terms, in [0, 1].
///
/// Implementations must be symmetric and return 1.0 for terms that are equal
/// after normalization.
pub trait TermSimilarity: Send + Sync {
    fn similarity(&self, left: &str, right: &str) -> OracleResult<f64>;
}

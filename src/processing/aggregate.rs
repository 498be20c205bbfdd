//! Group similarity by greedy one-to-one matching of term pairs, scored as a
//! weighted Jaccard index.

use std::cmp::Ordering;

use thiserror::Error;

use crate::oracle::{OracleError, TermSimilarity};
use crate::processing::cancellation::Cancellation;

/// Oracle failure on one term pair.
#[derive(Debug, Error, PartialEq)]
#[error("similarity of ({left}, {right}) failed: {source}")]
pub struct PairError {
    pub left: String,
    pub right: String,
    #[source]
    pub source: OracleError,
}

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error(transparent)]
    Pair(#[from] PairError),
    #[error("aggregation cancelled after {scored} of {total} pairs")]
    Cancelled { scored: usize, total: usize },
}

/// Similarity of `left[row]` and `right[col]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairScore {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Value descending, then row ascending, then column ascending.
pub fn by_descending_value(a: &PairScore, b: &PairScore) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then(a.row.cmp(&b.row))
        .then(a.col.cmp(&b.col))
}

/// Scores every pair of the cross product, row-major. Stops at the first
/// oracle failure, or before the next call once `cancel` is raised.
pub fn score_matrix<O, T>(
    left: &[T],
    right: &[T],
    oracle: &O,
    cancel: &Cancellation,
) -> Result<Vec<PairScore>, AggregateError>
where
    O: TermSimilarity + ?Sized,
    T: AsRef<str>,
{
    let total = left.len() * right.len();
    let mut scores = Vec::with_capacity(total);
    for (row, a) in left.iter().enumerate() {
        for (col, b) in right.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(AggregateError::Cancelled {
                    scored: scores.len(),
                    total,
                });
            }
            let value = oracle
                .similarity(a.as_ref(), b.as_ref())
                .map_err(|source| PairError {
                    left: a.as_ref().to_string(),
                    right: b.as_ref().to_string(),
                    source,
                })?;
            scores.push(PairScore { row, col, value });
        }
    }
    Ok(scores)
}

/// A one-to-one matching between rows and columns with the value each side
/// received. Unmatched rows and columns hold 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Matching {
    pairs: Vec<PairScore>,
    row_best: Vec<f64>,
    col_best: Vec<f64>,
}

impl Matching {
    /// Accepts pairs in [`by_descending_value`] order whenever both the row
    /// and the column are still free.
    ///
    /// This approximates a maximum-weight matching; it can miss a better
    /// assignment reachable by swapping partners.
    ///
    /// # Panics
    ///
    /// Panics if a score lies outside `rows × cols`.
    pub fn greedy(rows: usize, cols: usize, mut scores: Vec<PairScore>) -> Self {
        scores.sort_by(by_descending_value);

        let mut row_used = vec![false; rows];
        let mut col_used = vec![false; cols];
        let mut row_best = vec![0.0; rows];
        let mut col_best = vec![0.0; cols];
        let mut pairs = Vec::with_capacity(rows.min(cols));

        for score in scores {
            if row_used[score.row] || col_used[score.col] {
                continue;
            }
            row_used[score.row] = true;
            col_used[score.col] = true;
            row_best[score.row] = score.value;
            col_best[score.col] = score.value;
            pairs.push(score);
        }

        Self {
            pairs,
            row_best,
            col_best,
        }
    }

    /// Accepted pairs in acceptance order.
    pub fn pairs(&self) -> &[PairScore] {
        &self.pairs
    }

    pub fn row_best(&self) -> &[f64] {
        &self.row_best
    }

    pub fn col_best(&self) -> &[f64] {
        &self.col_best
    }

    /// Each side contributes half of its matched mass.
    pub fn weighted_intersection(&self) -> f64 {
        self.row_best.iter().sum::<f64>() / 2.0 + self.col_best.iter().sum::<f64>() / 2.0
    }

    /// `num / (m + n - num)`; two empty groups are identical.
    pub fn weighted_jaccard(&self) -> f64 {
        let intersection = self.weighted_intersection();
        let union = (self.row_best.len() + self.col_best.len()) as f64 - intersection;
        if union == 0.0 {
            return 1.0;
        }
        intersection / union
    }
}

/// Similarity of two groups of terms in [0, 1], calling the oracle once per
/// pair.
pub fn group_similarity<O, T>(
    left: &[T],
    right: &[T],
    oracle: &O,
    cancel: &Cancellation,
) -> Result<f64, AggregateError>
where
    O: TermSimilarity + ?Sized,
    T: AsRef<str>,
{
    let scores = score_matrix(left, right, oracle, cancel)?;
    let matching = Matching::greedy(left.len(), right.len(), scores);
    let similarity = matching.weighted_jaccard();
    log::debug!(
        "Group similarity {}x{}: {} matched pairs, score {similarity}",
        left.len(),
        right.len(),
        matching.pairs().len()
    );
    Ok(similarity)
}

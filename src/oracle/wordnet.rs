use std::path::Path;

use crate::domain::term::Term;
use crate::oracle::{OracleError, OracleResult, PAIR_SCORE_SCALE, TermSimilarity};
use crate::taxonomy::index::SenseIndex;
use crate::taxonomy::measure::SimilarityEngine;
use crate::taxonomy::wordnet::load_taxonomy;
use crate::taxonomy::{SenseId, TaxonomyResult};

/// Term similarity backed by the WordNet noun taxonomy: the best Lin score
/// over all sense pairs, scaled by [`PAIR_SCORE_SCALE`].
#[derive(Debug)]
pub struct WordnetOracle {
    index: SenseIndex,
    engine: SimilarityEngine,
}

impl WordnetOracle {
    pub fn new(index: SenseIndex, engine: SimilarityEngine) -> Self {
        Self { index, engine }
    }

    /// Loads the data files and the noun index from a WordNet `dict`
    /// directory and precomputes information content.
    ///
    /// This reads the whole dictionary and may take a few seconds.
    pub fn load(dir: &Path) -> TaxonomyResult<Self> {
        let taxonomy = load_taxonomy(dir)?;
        let index = SenseIndex::load(dir)?;
        Ok(Self::new(index, SimilarityEngine::new(taxonomy)))
    }

    pub fn senses(&self, term: &str) -> Option<&[SenseId]> {
        self.index
            .get(&Term::new(term).lookup_key())
            .filter(|senses| !senses.is_empty())
    }

    fn best_sense_similarity(&self, left: &[SenseId], right: &[SenseId]) -> OracleResult<f64> {
        let mut best = 0.0_f64;
        for a in left {
            for b in right {
                let sim = self
                    .engine
                    .compare(a, b)
                    .map_err(|error| OracleError::Computation(error.to_string()))?;
                if sim > best {
                    best = sim;
                }
            }
        }
        Ok(best)
    }
}

impl TermSimilarity for WordnetOracle {
    fn similarity(&self, left: &str, right: &str) -> OracleResult<f64> {
        let (left, right) = (Term::new(left), Term::new(right));
        if left == right {
            return Ok(1.0);
        }

        let left_senses = self.senses(left.as_str());
        let right_senses = self.senses(right.as_str());
        let (Some(left_senses), Some(right_senses)) = (left_senses, right_senses) else {
            log::debug!("No senses for ({left}, {right}); scoring 0");
            return Ok(0.0);
        };

        Ok(self.best_sense_similarity(left_senses, right_senses)? * PAIR_SCORE_SCALE)
    }
}

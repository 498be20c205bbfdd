//! Intrinsic information content (Seco, Veale and Hayes, 2004) and the Lin
//! (1998) pairwise measure.

use thiserror::Error;

use crate::taxonomy::{NodeIndex, SenseId, Taxonomy};

#[derive(Debug, Error, PartialEq)]
pub enum MeasureError {
    #[error("sense {0} is not in the taxonomy")]
    UnknownSense(SenseId),
    #[error("senses {0} and {1} share no ancestor")]
    NoCommonAncestor(SenseId, SenseId),
}

/// `IC(c) = 1 - ln(hypo(c) + 1) / ln(N)`.
pub fn seco_information_content(descendants: usize, node_count: usize) -> f64 {
    let log_n = (node_count as f64).ln();
    if log_n <= 0.0 {
        return 0.0;
    }
    1.0 - ((descendants + 1) as f64).ln() / log_n
}

/// Pairwise sense similarity over a taxonomy.
///
/// Ancestor sets and information content are computed once in [`new`],
/// after which the engine is read-only.
///
/// [`new`]: SimilarityEngine::new
#[derive(Debug)]
pub struct SimilarityEngine {
    taxonomy: Taxonomy,
    /// Sorted ancestors of each node, the node itself included.
    ancestors: Vec<Vec<NodeIndex>>,
    information_content: Vec<f64>,
}

impl SimilarityEngine {
    pub fn new(taxonomy: Taxonomy) -> Self {
        let node_count = taxonomy.len();
        let mut ancestors: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];

        for &node in taxonomy.topological_order() {
            let mut own = vec![node];
            for &parent in taxonomy.parents(node) {
                own.extend_from_slice(&ancestors[parent]);
            }
            own.sort_unstable();
            own.dedup();
            ancestors[node] = own;
        }

        let mut descendants = vec![0usize; node_count];
        for (node, node_ancestors) in ancestors.iter().enumerate() {
            for &ancestor in node_ancestors {
                if ancestor != node {
                    descendants[ancestor] += 1;
                }
            }
        }

        let information_content = descendants
            .iter()
            .map(|&count| seco_information_content(count, node_count))
            .collect();

        log::info!("Computed information content for {node_count} taxonomy nodes");

        Self {
            taxonomy,
            ancestors,
            information_content,
        }
    }

    pub fn information_content(&self, id: &SenseId) -> Option<f64> {
        self.taxonomy
            .node(id)
            .map(|node| self.information_content[node])
    }

    fn node(&self, id: &SenseId) -> Result<NodeIndex, MeasureError> {
        self.taxonomy
            .node(id)
            .ok_or(MeasureError::UnknownSense(*id))
    }

    /// Information content of the most informative common ancestor.
    fn mica_information_content(&self, left: NodeIndex, right: NodeIndex) -> Option<f64> {
        let (a, b) = (&self.ancestors[left], &self.ancestors[right]);
        let (mut i, mut j) = (0, 0);
        let mut best: Option<f64> = None;
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    let ic = self.information_content[a[i]];
                    best = Some(best.map_or(ic, |current| current.max(ic)));
                    i += 1;
                    j += 1;
                }
            }
        }
        best
    }

    /// Lin similarity `2·IC(mica) / (IC(a) + IC(b))`, in [0, 1].
    pub fn compare(&self, left: &SenseId, right: &SenseId) -> Result<f64, MeasureError> {
        let a = self.node(left)?;
        let b = self.node(right)?;
        if a == b {
            return Ok(1.0);
        }

        let mica = self
            .mica_information_content(a, b)
            .ok_or(MeasureError::NoCommonAncestor(*left, *right))?;
        let denominator = self.information_content[a] + self.information_content[b];
        if denominator == 0.0 {
            return Ok(0.0);
        }
        Ok(2.0 * mica / denominator)
    }
}

//! WordNet taxonomy: the synset graph, the noun sense index and the
//! information-content measure computed over the graph.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub mod index;
pub mod measure;
pub mod wordnet;

/// Index of a node in a [`Taxonomy`].
pub type NodeIndex = usize;

/// Errors raised while loading or validating a taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("taxonomy is not acyclic: {unreached} synsets are unreachable from the root")]
    Cycle { unreached: usize },
}

pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Parses a WordNet `ss_type`/`pos` tag. Satellite adjectives (`s`) share
    /// the adjective namespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "a" | "s" => Some(Self::Adjective),
            "r" => Some(Self::Adverb),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adjective => 'a',
            Self::Adverb => 'r',
        }
    }
}

/// Identifier of one word sense: a synset offset within its part of speech.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SenseId {
    pub pos: PartOfSpeech,
    pub offset: u32,
}

impl SenseId {
    pub fn new(pos: PartOfSpeech, offset: u32) -> Self {
        Self { pos, offset }
    }
}

impl fmt::Display for SenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:08}", self.pos.tag(), self.offset)
    }
}

/// Collects synsets and subsumption edges before the graph is rooted and
/// validated.
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    ids: HashMap<SenseId, NodeIndex>,
    senses: Vec<SenseId>,
    edges: Vec<(SenseId, SenseId)>,
}

impl TaxonomyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a synset. Registering the same id twice is a no-op.
    pub fn add_synset(&mut self, id: SenseId) {
        if !self.ids.contains_key(&id) {
            // Index 0 is reserved for the virtual root.
            self.ids.insert(id, self.senses.len() + 1);
            self.senses.push(id);
        }
    }

    /// Records that `child` is subsumed by `parent`.
    pub fn add_subsumption(&mut self, child: SenseId, parent: SenseId) {
        self.edges.push((child, parent));
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    /// Roots the graph under a virtual root and checks it is a DAG.
    ///
    /// Edges that mention an unregistered synset are dropped.
    pub fn build(self) -> TaxonomyResult<Taxonomy> {
        let node_count = self.senses.len() + 1;
        let mut parents: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
        let mut dangling = 0usize;

        for (child, parent) in &self.edges {
            match (self.ids.get(child), self.ids.get(parent)) {
                (Some(&child), Some(&parent)) => parents[child].push(parent),
                _ => dangling += 1,
            }
        }

        if dangling > 0 {
            log::warn!("Dropped {dangling} subsumption edges pointing outside the loaded synsets");
        }

        for node_parents in parents.iter_mut().skip(1) {
            node_parents.sort_unstable();
            node_parents.dedup();
            if node_parents.is_empty() {
                node_parents.push(Taxonomy::ROOT);
            }
        }

        let mut children: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
        for (child, node_parents) in parents.iter().enumerate() {
            for &parent in node_parents {
                children[parent].push(child);
            }
        }

        let order = topological_order(&parents, &children);
        if order.len() != node_count {
            return Err(TaxonomyError::Cycle {
                unreached: node_count - order.len(),
            });
        }

        let taxonomy = Taxonomy {
            ids: self.ids,
            senses: self.senses,
            parents,
            children,
            order,
        };

        log::info!(
            "Taxonomy rooted: {} synsets, {} taxonomic roots",
            taxonomy.senses.len(),
            taxonomy.children[Taxonomy::ROOT].len()
        );
        log::debug!(
            "Roots: {:?}",
            taxonomy.roots().map(|id| id.to_string()).collect::<Vec<_>>()
        );

        Ok(taxonomy)
    }
}

/// Kahn's walk from the root. Nodes left out of the result sit on a cycle
/// or below one.
fn topological_order(parents: &[Vec<NodeIndex>], children: &[Vec<NodeIndex>]) -> Vec<NodeIndex> {
    let mut pending: Vec<usize> = parents.iter().map(Vec::len).collect();
    let mut order = Vec::with_capacity(parents.len());
    let mut queue = vec![Taxonomy::ROOT];

    while let Some(node) = queue.pop() {
        order.push(node);
        for &child in &children[node] {
            pending[child] -= 1;
            if pending[child] == 0 {
                queue.push(child);
            }
        }
    }

    order
}

/// A rooted, acyclic subsumption graph over synsets.
#[derive(Debug)]
pub struct Taxonomy {
    ids: HashMap<SenseId, NodeIndex>,
    senses: Vec<SenseId>,
    parents: Vec<Vec<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    order: Vec<NodeIndex>,
}

impl Taxonomy {
    /// Index of the virtual root added while rooting the graph.
    pub const ROOT: NodeIndex = 0;

    /// Number of nodes, virtual root included.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    pub fn node(&self, id: &SenseId) -> Option<NodeIndex> {
        self.ids.get(id).copied()
    }

    /// The synset stored at `node`, `None` for the virtual root.
    pub fn sense(&self, node: NodeIndex) -> Option<SenseId> {
        node.checked_sub(1)
            .and_then(|index| self.senses.get(index))
            .copied()
    }

    pub fn parents(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.parents[node]
    }

    /// Nodes ordered so that every parent precedes its children.
    pub fn topological_order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Synsets that had no parent before rooting.
    pub fn roots(&self) -> impl Iterator<Item = SenseId> + '_ {
        self.children[Self::ROOT]
            .iter()
            .filter_map(|&node| self.sense(node))
    }
}

use crate::domain::term::{Group, Term};

pub mod aggregate;
pub mod cancellation;
pub mod similarity;

/// What one `/similarity` request asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum SimilarityRequest {
    /// Both sides hold exactly one term.
    Pair(Term, Term),
    Groups(Group, Group),
}

impl SimilarityRequest {
    /// Reads two path segments, each a term or a comma-separated list.
    pub fn parse(left: &str, right: &str) -> Self {
        let (left, right) = (Group::parse(left), Group::parse(right));
        match (left.single(), right.single()) {
            (Some(a), Some(b)) => Self::Pair(a.clone(), b.clone()),
            _ => Self::Groups(left, right),
        }
    }
}

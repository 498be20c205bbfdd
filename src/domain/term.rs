use std::fmt;

/// A case-insensitive label, stored trimmed and lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term(String);

impl Term {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key used against the sense index, where collocations are spelled
    /// with underscores (`hot_dog`).
    pub fn lookup_key(&self) -> String {
        self.0.split_whitespace().collect::<Vec<_>>().join("_")
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered list of terms; one side of a group comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    terms: Vec<Term>,
}

impl Group {
    /// Splits a comma-delimited list, keeping positions. Trailing empty
    /// entries are dropped; leading and inner ones stay as empty terms.
    pub fn parse(segment: &str) -> Self {
        let mut terms: Vec<Term> = segment.split(',').map(Term::new).collect();
        while terms.last().is_some_and(|term| term.as_str().is_empty()) {
            terms.pop();
        }
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The only term of a singleton group.
    pub fn single(&self) -> Option<&Term> {
        match self.terms.as_slice() {
            [term] => Some(term),
            _ => None,
        }
    }
}

impl From<Vec<Term>> for Group {
    fn from(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

#[cfg(test)]
mod tests {
    use super::{Group, Term};

    #[test]
    fn terms_compare_case_insensitively() {
        assert_eq!(Term::new("Dog"), Term::new(" DOG "));
    }

    #[test]
    fn lookup_key_joins_words_with_underscores() {
        assert_eq!(Term::new("Hot  Dog").lookup_key(), "hot_dog");
    }

    #[test]
    fn group_parse_trims_and_drops_trailing_empty_entries() {
        let group = Group::parse("dog, Cat,,");

        assert_eq!(group.terms(), &[Term::new("dog"), Term::new("cat")]);
        assert_eq!(Group::parse("dog,").single(), Some(&Term::new("dog")));
        assert!(Group::parse(" , ").is_empty());
        assert!(Group::parse("").is_empty());
    }

    #[test]
    fn group_parse_keeps_leading_and_inner_empty_entries() {
        assert_eq!(
            Group::parse("dog,,cat").terms(),
            &[Term::new("dog"), Term::new(""), Term::new("cat")]
        );
        assert_eq!(Group::parse(",dog").len(), 2);
        assert_eq!(Group::parse(",dog").single(), None);
    }
}

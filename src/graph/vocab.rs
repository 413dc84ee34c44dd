//! Corpus vocabulary
//!
//! Every distinct lemma gets exactly one [`VocabId`]. Ids are assigned in
//! sorted lemma order, so the same token stream always yields the same
//! vocabulary no matter how its rows are ordered.

use super::types::VocabId;
use crate::token::TokenRecord;
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// Bidirectional lemma <-> id mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    lemmas: IndexSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the token stream by lemma and number the groups
    pub fn build(tokens: &[TokenRecord]) -> Self {
        let distinct: BTreeSet<&str> = tokens.iter().map(|t| t.lemma.as_str()).collect();
        Self::from_lemmas(distinct)
    }

    /// Number lemmas in the given order, skipping repeats
    pub fn from_lemmas<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary {
            lemmas: lemmas.into_iter().map(Into::into).collect(),
        }
    }

    /// Look up the id of a lemma
    pub fn id_of(&self, lemma: &str) -> Option<VocabId> {
        self.lemmas.get_index_of(lemma).map(|i| VocabId(i as u64))
    }

    /// Look up the lemma of an id
    pub fn lemma(&self, id: VocabId) -> Option<&str> {
        self.lemmas.get_index(id.index()).map(String::as_str)
    }

    pub fn contains(&self, id: VocabId) -> bool {
        id.index() < self.lemmas.len()
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Entries in id order
    pub fn iter(&self) -> impl Iterator<Item = (VocabId, &str)> {
        self.lemmas
            .iter()
            .enumerate()
            .map(|(i, lemma)| (VocabId(i as u64), lemma.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Upos;

    fn token(id: u32, lemma: &str) -> TokenRecord {
        TokenRecord::new(0, 0, id, 0, lemma, Upos::Noun)
    }

    #[test]
    fn test_empty_stream() {
        let vocab = Vocabulary::build(&[]);
        assert!(vocab.is_empty());
        assert_eq!(vocab.id_of("anything"), None);
    }

    #[test]
    fn test_ids_are_injective_and_sorted() {
        let tokens = vec![token(1, "valve"), token(2, "pipe"), token(3, "valve"), token(4, "arm")];
        let vocab = Vocabulary::build(&tokens);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.id_of("arm"), Some(VocabId(0)));
        assert_eq!(vocab.id_of("pipe"), Some(VocabId(1)));
        assert_eq!(vocab.id_of("valve"), Some(VocabId(2)));
        assert_eq!(vocab.lemma(VocabId(1)), Some("pipe"));
        assert_eq!(vocab.lemma(VocabId(3)), None);
    }

    #[test]
    fn test_independent_of_row_order() {
        let forward = vec![token(1, "b"), token(2, "a"), token(3, "c")];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(Vocabulary::build(&forward), Vocabulary::build(&backward));
    }

    #[test]
    fn test_lemmas_are_case_sensitive_keys() {
        let vocab = Vocabulary::build(&[token(1, "The"), token(2, "the")]);
        assert_eq!(vocab.len(), 2);
        let collected: Vec<_> = vocab.iter().map(|(_, l)| l).collect();
        assert_eq!(collected, vec!["The", "the"]);
    }
}

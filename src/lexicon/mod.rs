//! Word -> coordinate lexicon.
//!
//! The [`WordIndex`] trait is the seam the resolver depends on; the
//! in-memory [`LexiconIndex`] prefix tree is the only backend.

mod loader;
mod trie;

pub use loader::{load_dictionary, parse_dictionary, DictionaryLoad};
pub use trie::{edit_distance, LexiconIndex};

use serde::Serialize;

use crate::coordinate::Coordinate;

/// One approximate-lookup hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Dictionary word that matched.
    pub word: String,
    /// Its stored coordinate.
    pub coordinate: Coordinate,
    /// Levenshtein distance from the query.
    pub distance: usize,
}

/// Read-only lookup contract used by the resolver.
pub trait WordIndex {
    /// Returns the coordinate stored for exactly `word`.
    fn exact_lookup(&self, word: &str) -> Option<Coordinate>;

    /// Returns every stored word within `max_distance` edits of `word`,
    /// ordered by non-decreasing distance. Equal distances keep the index's
    /// structural order.
    fn approximate_lookup(&self, word: &str, max_distance: usize) -> Vec<Candidate>;
}

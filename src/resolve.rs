//! Attaching coordinates and colors to aggregated words.
//!
//! Exact lookup is tried first. On a miss the approximate fallback runs, and
//! the LAST candidate of its distance-ordered list is taken, i.e. the
//! farthest word still within the bound. Rendered output depends on this
//! choice, so it is kept as is.

use serde::Serialize;
use tracing::debug;

use crate::aggregate::AggregatedWord;
use crate::color::{derive_color, Color};
use crate::config::ResolveConfig;
use crate::coordinate::Coordinate;
use crate::error::ValidationError;
use crate::lexicon::WordIndex;

/// How a word found its coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// The word itself is in the dictionary.
    Exact,
    /// A nearby dictionary word was used.
    Approximate {
        /// The dictionary word whose coordinate was taken.
        candidate: String,
        /// Its edit distance from the word.
        distance: usize,
    },
}

/// A word ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedWord {
    /// The aggregated record.
    pub word: AggregatedWord,
    /// Position in the embedding plane.
    pub coordinate: Coordinate,
    /// Block color.
    pub color: Color,
    /// Lookup path taken.
    pub matched: MatchKind,
}

/// Output of resolving an aggregation.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Words with both coordinate and color, in input order.
    pub resolved: Vec<ResolvedWord>,
    /// Words with no exact or approximate match.
    pub unknown: Vec<String>,
}

impl Resolution {
    /// Number of exact matches.
    #[must_use]
    pub fn exact_count(&self) -> usize {
        self.resolved
            .iter()
            .filter(|r| r.matched == MatchKind::Exact)
            .count()
    }

    /// Number of approximate matches.
    #[must_use]
    pub fn approximate_count(&self) -> usize {
        self.resolved.len() - self.exact_count()
    }
}

/// Resolves words against a [`WordIndex`].
#[derive(Debug)]
pub struct Resolver<'a, I: WordIndex + ?Sized> {
    index: &'a I,
    config: ResolveConfig,
}

impl<'a, I: WordIndex + ?Sized> Resolver<'a, I> {
    /// Creates a resolver.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ColorSizeOutOfRange` if the configured color
    /// digest cannot fill three channels.
    pub fn new(index: &'a I, config: ResolveConfig) -> Result<Self, ValidationError> {
        // Fail here rather than on the first word.
        derive_color("", config.color_size)?;
        Ok(Self { index, config })
    }

    /// Finds a coordinate for `word`.
    #[must_use]
    pub fn locate(&self, word: &str) -> Option<(Coordinate, MatchKind)> {
        if let Some(coordinate) = self.index.exact_lookup(word) {
            return Some((coordinate, MatchKind::Exact));
        }

        let candidate = self
            .index
            .approximate_lookup(word, self.config.max_edit_distance)
            .pop()?;
        debug!(
            word,
            candidate = %candidate.word,
            distance = candidate.distance,
            "approximate match"
        );
        Some((
            candidate.coordinate,
            MatchKind::Approximate {
                candidate: candidate.word,
                distance: candidate.distance,
            },
        ))
    }

    /// Resolves one word, or returns `None` if it is unknown.
    ///
    /// # Errors
    ///
    /// Propagates color derivation errors.
    pub fn resolve(&self, word: AggregatedWord) -> Result<Option<ResolvedWord>, ValidationError> {
        let Some((coordinate, matched)) = self.locate(&word.word) else {
            return Ok(None);
        };
        let color = derive_color(&word.word, self.config.color_size)?;
        Ok(Some(ResolvedWord {
            word,
            coordinate,
            color,
            matched,
        }))
    }

    /// Resolves every word, splitting out the unknown ones.
    ///
    /// # Errors
    ///
    /// Propagates color derivation errors.
    pub fn resolve_all(
        &self,
        words: impl IntoIterator<Item = AggregatedWord>,
    ) -> Result<Resolution, ValidationError> {
        let mut out = Resolution::default();
        for word in words {
            let name = word.word.clone();
            match self.resolve(word)? {
                Some(r) => out.resolved.push(r),
                None => out.unknown.push(name),
            }
        }
        Ok(out)
    }
}

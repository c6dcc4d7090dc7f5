//! Folding raw tokens into one record per distinct word.
//!
//! The position signal is a halving running average: each new occurrence
//! moves the signal halfway toward its own index, rounding down. It is not
//! the arithmetic mean of the occurrence indices and must not be replaced by
//! one, since block jitter is derived from it.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::TextConfig;
use crate::text::{is_blank, normalize};

/// One distinct normalized word of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedWord {
    /// Normalized word, unique within one aggregation.
    pub word: String,
    /// Number of tokens that normalized to `word`.
    pub count: u32,
    /// Halving running average of occurrence indices.
    pub position_signal: u64,
}

impl AggregatedWord {
    /// Record for a first occurrence.
    #[must_use]
    pub fn first(word: impl Into<String>, index: u64) -> Self {
        Self {
            word: word.into(),
            count: 1,
            position_signal: index,
        }
    }

    /// Folds another occurrence at `index` into this record.
    pub fn fold(&mut self, index: u64) {
        self.position_signal = (index + self.position_signal) / 2;
        self.count = self.count.saturating_add(1);
    }
}

/// Result of aggregating a token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Distinct words in first-seen order.
    pub words: Vec<AggregatedWord>,
    /// Tokens seen, blanks included.
    pub raw_tokens: usize,
    /// Tokens that received an occurrence index.
    pub kept_tokens: usize,
    /// Kept tokens that normalized to the empty word.
    pub empty_after_normalize: usize,
}

/// Incremental aggregator.
///
/// Occurrence indices count non-blank tokens only, starting at zero.
#[derive(Debug)]
pub struct Aggregator<'a> {
    config: &'a TextConfig,
    slots: HashMap<String, usize>,
    out: Aggregation,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator using `config`'s strip table.
    #[must_use]
    pub fn new(config: &'a TextConfig) -> Self {
        Self {
            config,
            slots: HashMap::new(),
            out: Aggregation::default(),
        }
    }

    /// Feeds one raw token.
    pub fn push(&mut self, token: &str) {
        self.out.raw_tokens += 1;
        if is_blank(token) {
            return;
        }

        let index = self.out.kept_tokens as u64;
        self.out.kept_tokens += 1;

        // A token made only of stripped characters becomes the empty word.
        let word = normalize(token, self.config);
        if word.is_empty() {
            self.out.empty_after_normalize += 1;
        }

        if let Some(&slot) = self.slots.get(&word) {
            self.out.words[slot].fold(index);
        } else {
            self.slots.insert(word.clone(), self.out.words.len());
            self.out.words.push(AggregatedWord::first(word, index));
        }
    }

    /// Finishes aggregation.
    #[must_use]
    pub fn finish(self) -> Aggregation {
        self.out
    }
}

/// Aggregates a whole token sequence.
///
/// ```
/// use texelmap::aggregate::aggregate;
/// use texelmap::config::TextConfig;
///
/// let agg = aggregate(["cat", "dog", "cat", "cat"], &TextConfig::default());
/// let cat = &agg.words[0];
/// assert_eq!((cat.count, cat.position_signal), (3, 2));
/// ```
#[must_use]
pub fn aggregate<I, S>(tokens: I, config: &TextConfig) -> Aggregation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = Aggregator::new(config);
    for token in tokens {
        aggregator.push(token.as_ref());
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tokens: &[&str]) -> Aggregation {
        aggregate(tokens.iter().copied(), &TextConfig::default())
    }

    fn find<'a>(agg: &'a Aggregation, word: &str) -> &'a AggregatedWord {
        agg.words.iter().find(|w| w.word == word).unwrap()
    }

    #[test]
    fn test_counts_and_halving_signal() {
        let agg = run(&["cat", "dog", "cat", "cat"]);
        let cat = find(&agg, "cat");
        assert_eq!(cat.count, 3);
        // 0, then (2 + 0) / 2 = 1, then (3 + 1) / 2 = 2
        assert_eq!(cat.position_signal, 2);

        let dog = find(&agg, "dog");
        assert_eq!(dog.count, 1);
        assert_eq!(dog.position_signal, 1);
    }

    #[test]
    fn test_signal_is_not_true_mean() {
        // indices 0, 1, 10: mean would be 3; recurrence gives (10 + 0) / 2
        let agg = run(&["a", "a", "b", "b", "b", "b", "b", "b", "b", "b", "a"]);
        assert_eq!(find(&agg, "a").position_signal, 5);
    }

    #[test]
    fn test_fold_step_by_step() {
        let mut w = AggregatedWord::first("cat", 0);
        assert_eq!(w.position_signal, 0);
        w.fold(2);
        assert_eq!(w.position_signal, 1);
        w.fold(3);
        assert_eq!(w.position_signal, 2);
        assert_eq!(w.count, 3);
    }

    #[test]
    fn test_blank_tokens_do_not_consume_index() {
        let agg = run(&["", "  ", "cat", "", "dog"]);
        assert_eq!(agg.raw_tokens, 5);
        assert_eq!(agg.kept_tokens, 2);
        assert_eq!(find(&agg, "cat").position_signal, 0);
        assert_eq!(find(&agg, "dog").position_signal, 1);
    }

    #[test]
    fn test_stripped_tokens_become_the_empty_word() {
        let agg = run(&["!?", "cat"]);
        assert_eq!(agg.empty_after_normalize, 1);
        assert_eq!(agg.words.len(), 2);

        let empty = find(&agg, "");
        assert_eq!((empty.count, empty.position_signal), (1, 0));
        assert_eq!(find(&agg, "cat").position_signal, 1);
    }

    #[test]
    fn test_punctuation_only_tokens_merge() {
        let agg = run(&["!", "?", "\"", "!"]);
        assert_eq!(agg.empty_after_normalize, 4);
        assert_eq!(agg.words.len(), 1);
        assert_eq!(agg.words[0].word, "");
        assert_eq!(agg.words[0].count, 4);
        // 0, (1 + 0) / 2 = 0, (2 + 0) / 2 = 1, (3 + 1) / 2 = 2
        assert_eq!(agg.words[0].position_signal, 2);
    }

    #[test]
    fn test_variants_merge_after_normalization() {
        let agg = run(&["Cat,", "cat", "\"CAT\""]);
        assert_eq!(agg.words.len(), 1);
        assert_eq!(agg.words[0].word, "cat");
        assert_eq!(agg.words[0].count, 3);
    }

    #[test]
    fn test_output_is_first_seen_order() {
        let agg = run(&["zebra", "apple", "zebra", "mango"]);
        let words: Vec<&str> = agg.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }
}

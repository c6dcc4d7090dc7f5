//! Prefix tree over dictionary words with bounded Levenshtein search.
//!
//! Nodes live in a single arena and refer to each other by index. Child
//! edges are kept in first-insertion order, which fixes the depth-first
//! visiting order and therefore the tie order among equally distant
//! approximate candidates.

use crate::coordinate::Coordinate;
use crate::lexicon::{Candidate, WordIndex};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    children: Vec<(char, NodeId)>,
    value: Option<Coordinate>,
}

/// In-memory word -> coordinate index.
///
/// Built once from the dictionary, then queried read-only.
///
/// # Examples
///
/// ```
/// use texelmap::{Coordinate, LexiconIndex, WordIndex};
///
/// let index = LexiconIndex::build([
///     ("kucing", Coordinate::new(0.1, 0.2).unwrap()),
///     ("kuda", Coordinate::new(0.3, 0.4).unwrap()),
/// ]);
///
/// assert!(index.exact_lookup("kuda").is_some());
/// let near = index.approximate_lookup("kucin", 1);
/// assert_eq!(near[0].word, "kucing");
/// ```
#[derive(Debug, Clone)]
pub struct LexiconIndex {
    nodes: Vec<Node>,
    len: usize,
}

impl Default for LexiconIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            len: 0,
        }
    }

    /// Builds an index from (word, coordinate) pairs.
    ///
    /// Later duplicates overwrite earlier ones.
    #[must_use]
    pub fn build<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for (word, coordinate) in entries {
            index.insert(word.as_ref(), coordinate);
        }
        index
    }

    /// Inserts a word, returning the coordinate it replaced, if any.
    pub fn insert(&mut self, word: &str, coordinate: Coordinate) -> Option<Coordinate> {
        let mut node = ROOT;
        for ch in word.chars() {
            node = match self.child(node, ch) {
                Some(next) => next,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.push((ch, id));
                    id
                }
            };
        }

        let previous = self.nodes[node].value.replace(coordinate);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Number of distinct words.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no word has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `word` is stored verbatim.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some()
    }

    fn child(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[node]
            .children
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|&(_, id)| id)
    }

    fn find(&self, word: &str) -> Option<Coordinate> {
        let mut node = ROOT;
        for ch in word.chars() {
            node = self.child(node, ch)?;
        }
        self.nodes[node].value
    }
}

/// State of one approximate lookup.
struct Search<'a> {
    nodes: &'a [Node],
    query: Vec<char>,
    max_distance: usize,
    prefix: String,
    out: Vec<Candidate>,
}

impl Search<'_> {
    // One DP row per visited node: row[i] is the distance between the
    // current prefix and the first i chars of the query.
    fn visit(&mut self, node: NodeId, ch: char, prev_row: &[usize]) {
        let mut row = Vec::with_capacity(prev_row.len());
        row.push(prev_row[0] + 1);
        for (i, &qc) in self.query.iter().enumerate() {
            let insert = row[i] + 1;
            let delete = prev_row[i + 1] + 1;
            let replace = prev_row[i] + usize::from(qc != ch);
            row.push(insert.min(delete).min(replace));
        }

        self.prefix.push(ch);

        let distance = row[self.query.len()];
        if let Some(coordinate) = self.nodes[node].value {
            if distance <= self.max_distance {
                self.out.push(Candidate {
                    word: self.prefix.clone(),
                    coordinate,
                    distance,
                });
            }
        }

        if row.iter().min().is_some_and(|&m| m <= self.max_distance) {
            let nodes = self.nodes;
            for &(next_ch, next) in &nodes[node].children {
                self.visit(next, next_ch, &row);
            }
        }

        self.prefix.pop();
    }
}

impl WordIndex for LexiconIndex {
    fn exact_lookup(&self, word: &str) -> Option<Coordinate> {
        self.find(word)
    }

    fn approximate_lookup(&self, word: &str, max_distance: usize) -> Vec<Candidate> {
        let mut search = Search {
            nodes: &self.nodes,
            query: word.chars().collect(),
            max_distance,
            prefix: String::new(),
            out: Vec::new(),
        };
        let query_len = search.query.len();

        if let Some(coordinate) = self.nodes[ROOT].value {
            if query_len <= max_distance {
                search.out.push(Candidate {
                    word: String::new(),
                    coordinate,
                    distance: query_len,
                });
            }
        }

        let first_row: Vec<usize> = (0..=query_len).collect();
        for &(ch, child) in &self.nodes[ROOT].children {
            search.visit(child, ch, &first_row);
        }

        // Stable: equal distances keep depth-first order.
        let mut out = search.out;
        out.sort_by_key(|c| c.distance);
        out
    }
}

impl<S: AsRef<str>> FromIterator<(S, Coordinate)> for LexiconIndex {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Levenshtein distance over Unicode scalar values.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let replace = prev[j] + usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(replace);
        }
        std::mem::swap(&mut prev, &mut row);
    }

    prev[b.len()]
}

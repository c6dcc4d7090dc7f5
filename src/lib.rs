//! # texelmap - Word-embedding texel maps
//!
//! texelmap renders a document as a square image in which every distinct
//! word is one colored block. A word's position comes from a dictionary of
//! precomputed 2D embedding coordinates, its color from a hash of the word,
//! and its block size from how often it occurs.
//!
//! ## Core Concepts
//!
//! - **Lexicon**: prefix-tree index from words to coordinates, with a bounded
//!   edit-distance fallback for words missing from the dictionary
//! - **Aggregation**: folding repeated tokens into one record with a count and
//!   a halving-average position signal
//! - **Resolution**: attaching a coordinate and a color to each record
//! - **Compositing**: painting blocks in descending frequency on a canvas
//!
//! ## Usage
//!
//! ```rust
//! use texelmap::{Coordinate, LexiconIndex, PipelineConfig};
//! use texelmap::pipeline::render_text;
//!
//! let index = LexiconIndex::build([
//!     ("cat", Coordinate::new(0.5, 0.5).unwrap()),
//! ]);
//! let text = "cat cat cat cat cat cat cat cat";
//! let (canvas, report) = render_text(&index, text, &PipelineConfig::default()).unwrap();
//! assert_eq!(canvas.dimensions(), (256, 256));
//! assert_eq!(report.exact_matches, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod color;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod render;
pub mod resolve;
pub mod text;

// Re-export primary types at crate root for convenience
pub use aggregate::{AggregatedWord, Aggregation, Aggregator};
pub use color::{derive_color, Color};
pub use config::{PipelineConfig, RenderConfig, ResolveConfig, TextConfig};
pub use coordinate::Coordinate;
pub use error::{LoadError, OutputError, TexelError, TexelResult, ValidationError};
pub use lexicon::{load_dictionary, Candidate, DictionaryLoad, LexiconIndex, WordIndex};
pub use pipeline::{process, render_text, DictionaryStats, RunReport};
pub use render::Compositor;
pub use resolve::{MatchKind, ResolvedWord, Resolver};

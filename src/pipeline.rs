//! End-to-end run: document -> tokens -> words -> resolved words -> image.
//!
//! A run is synchronous and owns everything it creates. The lexicon is only
//! borrowed. Any error aborts the run before an image is written.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use tracing::info;

use crate::aggregate::aggregate;
use crate::config::PipelineConfig;
use crate::error::{LoadError, OutputError, TexelResult};
use crate::lexicon::{DictionaryLoad, WordIndex};
use crate::render::Compositor;
use crate::resolve::Resolver;
use crate::text::tokenize;

/// Dictionary counters, as reported alongside a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    /// Records parsed.
    pub loaded: usize,
    /// Distinct words indexed.
    pub distinct: usize,
    /// Malformed lines skipped.
    pub skipped: usize,
}

impl From<&DictionaryLoad> for DictionaryStats {
    fn from(load: &DictionaryLoad) -> Self {
        Self {
            loaded: load.loaded,
            distinct: load.index.len(),
            skipped: load.skipped,
        }
    }
}

/// Diagnostics of one run. Skips and misses are tallied here, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Dictionary counters, when the caller loaded one from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<DictionaryStats>,
    /// Tokens produced by the tokenizer.
    pub raw_tokens: usize,
    /// Non-blank tokens.
    pub kept_tokens: usize,
    /// Non-blank tokens that normalized to nothing.
    pub empty_after_normalize: usize,
    /// Distinct normalized words.
    pub distinct_words: usize,
    /// Words found verbatim.
    pub exact_matches: usize,
    /// Words placed through the approximate fallback.
    pub approximate_matches: usize,
    /// Words with no match, dropped from the image.
    pub unknown_words: usize,
    /// Blocks handed to the compositor.
    pub painted_blocks: usize,
    /// Blocks too small to cover a pixel.
    pub empty_blocks: usize,
    /// Canvas side length.
    pub resolution: u32,
    /// Where the image was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RunReport {
    /// Attaches dictionary counters.
    #[must_use]
    pub fn with_dictionary(mut self, stats: DictionaryStats) -> Self {
        self.dictionary = Some(stats);
        self
    }
}

/// Renders `text` in memory.
///
/// # Errors
///
/// Returns `TexelError::Validation` if `config` is invalid.
pub fn render_text<I>(
    index: &I,
    text: &str,
    config: &PipelineConfig,
) -> TexelResult<(RgbaImage, RunReport)>
where
    I: WordIndex + ?Sized,
{
    config.validate()?;
    let compositor = Compositor::new(config.render.clone())?;
    let resolver = Resolver::new(index, config.resolve.clone())?;

    let tokens = tokenize(text, &config.text);
    let aggregation = aggregate(&tokens, &config.text);
    info!(
        tokens = aggregation.raw_tokens,
        kept = aggregation.kept_tokens,
        distinct = aggregation.words.len(),
        "document aggregated"
    );

    let distinct_words = aggregation.words.len();
    let resolution = resolver.resolve_all(aggregation.words)?;
    info!(
        resolved = resolution.resolved.len(),
        approximate = resolution.approximate_count(),
        unknown = resolution.unknown.len(),
        "words resolved"
    );

    let (canvas, stats) = compositor.render(&resolution.resolved);

    let report = RunReport {
        dictionary: None,
        raw_tokens: aggregation.raw_tokens,
        kept_tokens: aggregation.kept_tokens,
        empty_after_normalize: aggregation.empty_after_normalize,
        distinct_words,
        exact_matches: resolution.exact_count(),
        approximate_matches: resolution.approximate_count(),
        unknown_words: resolution.unknown.len(),
        painted_blocks: stats.blocks,
        empty_blocks: stats.empty_blocks,
        resolution: compositor.resolution(),
        output: None,
    };
    Ok((canvas, report))
}

/// Reads a document as text. Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
///
/// Returns `LoadError::Document` if the file cannot be read.
pub fn read_document(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `canvas` as an RGBA PNG.
///
/// # Errors
///
/// Returns `OutputError::Image` if encoding or writing fails.
pub fn write_png(canvas: &RgbaImage, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    canvas
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| OutputError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `report` as pretty JSON.
///
/// # Errors
///
/// Returns `OutputError::Report` if serialization or writing fails.
pub fn write_report(report: &RunReport, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let err = |message: String| OutputError::Report {
        path: path.to_path_buf(),
        message,
    };
    let json = serde_json::to_string_pretty(report).map_err(|e| err(e.to_string()))?;
    fs::write(path, json).map_err(|e| err(e.to_string()))
}

/// Renders the document at `document` and writes the PNG to `output`.
///
/// # Errors
///
/// Fails if the document is unreadable, the configuration is invalid, or
/// the image cannot be written. Nothing is written on failure.
pub fn process<I>(
    index: &I,
    document: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PipelineConfig,
) -> TexelResult<RunReport>
where
    I: WordIndex + ?Sized,
{
    let text = read_document(document)?;
    let (canvas, mut report) = render_text(index, &text, config)?;

    let output = output.as_ref();
    write_png(&canvas, output)?;
    info!(path = %output.display(), "image written");

    report.output = Some(output.to_path_buf());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::lexicon::LexiconIndex;

    fn index() -> LexiconIndex {
        LexiconIndex::build([
            ("cat", Coordinate::new(0.25, 0.25).unwrap()),
            ("dog", Coordinate::new(0.75, 0.75).unwrap()),
        ])
    }

    #[test]
    fn test_render_text_counts() {
        let text = "Cat cat, dog. Dogs!  zzzzzzzz ?";
        let (canvas, report) = render_text(&index(), text, &PipelineConfig::with_resolution(64)).unwrap();

        assert_eq!(canvas.dimensions(), (64, 64));
        // cat, dog, dogs, zzzzzzzz and the empty word left by "?"
        assert_eq!(report.distinct_words, 5);
        assert_eq!(report.exact_matches, 2);
        assert_eq!(report.approximate_matches, 2);
        assert_eq!(report.unknown_words, 1);
        assert_eq!(report.empty_after_normalize, 1);
        assert_eq!(report.painted_blocks, 4);
    }

    #[test]
    fn test_punctuation_tokens_are_painted() {
        let index = LexiconIndex::build([("a", Coordinate::new(0.5, 0.5).unwrap())]);
        let (canvas, report) =
            render_text(&index, "! ! ! !", &PipelineConfig::with_resolution(16)).unwrap();

        assert_eq!(report.distinct_words, 1);
        assert_eq!(report.approximate_matches, 1);
        assert_eq!(report.empty_blocks, 0);
        // count 4 gives half extent 1; signal 2 gives jitter 1: pixels [8, 10)
        let painted: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] != 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(painted, vec![(8, 8), (9, 8), (8, 9), (9, 9)]);
    }

    #[test]
    fn test_huge_coordinate_lands_off_canvas() {
        let index = LexiconIndex::build([("far", Coordinate::new(1e300, 1e300).unwrap())]);
        let (canvas, report) =
            render_text(&index, "x far far far far far", &PipelineConfig::with_resolution(32))
                .unwrap();

        assert_eq!(report.exact_matches, 1);
        assert_eq!(report.approximate_matches, 1);
        assert_eq!(report.painted_blocks, 2);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_render_text_is_deterministic() {
        let text = "dog cat dog cat cat dog dog dog cat cats";
        let config = PipelineConfig::with_resolution(32);
        let (a, _) = render_text(&index(), text, &config).unwrap();
        let (b, _) = render_text(&index(), text, &config).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = render_text(&index(), "cat", &PipelineConfig::with_resolution(0)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_report_json_omits_missing_sections() {
        let json = serde_json::to_value(RunReport::default()).unwrap();
        assert!(json.get("dictionary").is_none());
        assert!(json.get("output").is_none());
        assert_eq!(json["unknown_words"], 0);
    }
}

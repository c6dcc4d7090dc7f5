//! Dictionary file reader.
//!
//! Format: one `word x y` record per line, fields separated by whitespace.
//! Malformed lines are skipped and tallied; only an unreadable file is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::coordinate::Coordinate;
use crate::error::LoadError;
use crate::lexicon::LexiconIndex;

const PROGRESS_EVERY: usize = 100_000;

/// Outcome of reading a dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryLoad {
    /// The built index.
    pub index: LexiconIndex,
    /// Records parsed successfully (duplicates included).
    pub loaded: usize,
    /// Non-blank lines that were skipped.
    pub skipped: usize,
}

enum Line<'a> {
    Blank,
    Entry(&'a str, Coordinate),
    Malformed(&'static str),
}

fn parse_line(line: &str) -> Line<'_> {
    let mut fields = line.split_whitespace();
    let Some(word) = fields.next() else {
        return Line::Blank;
    };
    let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
        return Line::Malformed("missing coordinate");
    };
    let (Ok(x), Ok(y)) = (x.parse::<f64>(), y.parse::<f64>()) else {
        return Line::Malformed("unparseable coordinate");
    };
    match Coordinate::new(x, y) {
        Ok(c) => Line::Entry(word, c),
        Err(_) => Line::Malformed("non-finite coordinate"),
    }
}

/// Builds an index from any buffered reader.
///
/// Invalid UTF-8 is replaced rather than rejected, so one bad line cannot
/// abort the load.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub fn parse_dictionary<R: BufRead>(mut reader: R) -> std::io::Result<DictionaryLoad> {
    let mut index = LexiconIndex::new();
    let mut loaded = 0usize;
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line) {
            Line::Blank => {}
            Line::Entry(word, coordinate) => {
                index.insert(word, coordinate);
                loaded += 1;
            }
            Line::Malformed(reason) => {
                debug!(line = line_no, reason, "skipping dictionary line");
                skipped += 1;
            }
        }

        if line_no % PROGRESS_EVERY == 0 {
            debug!(lines = line_no, loaded, "scanning dictionary");
        }
    }

    Ok(DictionaryLoad {
        index,
        loaded,
        skipped,
    })
}

/// Reads the dictionary at `path`.
///
/// # Errors
///
/// Returns `LoadError::Dictionary` if the file cannot be opened or read.
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<DictionaryLoad, LoadError> {
    let path = path.as_ref();
    let err = |source| LoadError::Dictionary {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(err)?;
    let load = parse_dictionary(BufReader::new(file)).map_err(err)?;

    info!(
        path = %path.display(),
        loaded = load.loaded,
        distinct = load.index.len(),
        skipped = load.skipped,
        "dictionary loaded"
    );
    Ok(load)
}

//! Document tokenizing and word normalization.
//!
//! Both steps are driven by the literal tables in [`TextConfig`]; there is no
//! language-aware processing.

use crate::config::TextConfig;

/// Splits document text into raw tokens.
///
/// Every separator character becomes a space, then the text is split on
/// single spaces. Consecutive separators therefore produce empty tokens,
/// which the aggregator discards.
///
/// ```
/// use texelmap::config::TextConfig;
/// use texelmap::text::tokenize;
///
/// let tokens = tokenize("well-known.\nfact", &TextConfig::default());
/// assert_eq!(tokens, vec!["well", "known", "", "fact"]);
/// ```
#[must_use]
pub fn tokenize(text: &str, config: &TextConfig) -> Vec<String> {
    let replaced: String = text
        .chars()
        .map(|c| if config.separators.contains(&c) { ' ' } else { c })
        .collect();
    replaced.split(' ').map(str::to_owned).collect()
}

/// Returns true for tokens dropped before normalization.
#[must_use]
pub fn is_blank(token: &str) -> bool {
    token.trim().is_empty()
}

/// Canonical form of a token: trimmed, stripped of the configured
/// characters, lowercased.
///
/// ```
/// use texelmap::config::TextConfig;
/// use texelmap::text::normalize;
///
/// assert_eq!(normalize("Cat,", &TextConfig::default()), "cat");
/// assert_eq!(normalize(" \"Don't!\" ", &TextConfig::default()), "dont");
/// ```
#[must_use]
pub fn normalize(token: &str, config: &TextConfig) -> String {
    token
        .trim()
        .chars()
        .filter(|c| !config.strip_chars.contains(c))
        .collect::<String>()
        .to_lowercase()
}

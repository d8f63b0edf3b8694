//! Word tokenizer for product titles and identifier segments.

use regex::Regex;
use std::sync::LazyLock;

/// A token is a letter followed by at least one letter or digit.
/// Single-character runs are dropped on purpose — stray initials and
/// edition letters are noise for matching.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][a-z0-9]+").expect("static regex"));

/// Extract lowercase word tokens from `text` in order of appearance.
///
/// Duplicates within one call are kept; deduplication is the reducer's
/// concern. Input with no qualifying tokens yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

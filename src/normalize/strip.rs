//! Display-name stripping against a group's invariant token set.

use crate::normalize::tokenize;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Removes a group's invariant tokens (and a per-member version literal)
/// from display names, as whole words only.
///
/// One stripper is compiled per group and reused across its members. Word
/// boundaries are non-alphanumeric characters or string edges: removing
/// `arm` never touches `alarm`, and never carves `arm64` down to `64`.
pub struct TokenStripper {
    /// Alternation over all invariant tokens; `None` when the group has no
    /// invariant tokens.
    token_re: Option<Regex>,
    /// Lowercased invariant tokens, for the final residue filter.
    invariant: Vec<String>,
}

impl TokenStripper {
    /// Compile a stripper for the given invariant tokens.
    pub fn new<S: AsRef<str>>(invariant_tokens: &[S]) -> Self {
        let invariant: Vec<String> = invariant_tokens
            .iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect();
        if invariant.is_empty() {
            return Self {
                token_re: None,
                invariant,
            };
        }

        let alternation = invariant
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?i)\b(?:{alternation})\b");
        // All alternatives are regex-escaped, so the pattern is valid by
        // construction.
        let token_re = Regex::new(&pattern).expect("escaped token alternation");

        Self {
            token_re: Some(token_re),
            invariant,
        }
    }

    /// Strip invariant tokens and the version numeral from `display_name`.
    ///
    /// Returns the collapsed residue text and its re-tokenized words. A
    /// display name fully consumed by removal yields `("", [])` — never a
    /// single empty token. The token list never contains an invariant
    /// token or the version literal, even when one survives in the text as
    /// part of a larger word that re-tokenizes to it (digit-led words like
    /// `1ab` shed their leading digit under tokenization).
    pub fn strip(&self, display_name: &str, version_literal: &str) -> (String, Vec<String>) {
        let mut residue = match &self.token_re {
            Some(re) => re.replace_all(display_name, " ").into_owned(),
            None => display_name.to_string(),
        };

        if !version_literal.is_empty() {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(version_literal));
            let version_re = Regex::new(&pattern).expect("escaped version literal");
            residue = version_re.replace_all(&residue, " ").into_owned();
        }

        let collapsed = WHITESPACE_RE.replace_all(&residue, " ").trim().to_string();
        let version_lowered = version_literal.to_lowercase();
        let residue_tokens = tokenize(&collapsed)
            .into_iter()
            .filter(|token| !self.invariant.contains(token) && *token != version_lowered)
            .collect();

        (collapsed, residue_tokens)
    }
}

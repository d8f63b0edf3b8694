//! Identifier alias-list adapter.
//!
//! The feed is plain text: groups of equivalent identifiers separated by
//! blank lines. Only application (`cpe:/a:`) and operating-system
//! (`cpe:/o:`) identifiers participate; anything else in a block is
//! ignored. Stored aliases are percent-decoded with the scheme marker
//! stripped, matching what the dictionary catalog stores.

use crate::error::Result;
use crate::model::{AliasCatalog, AliasSet};
use percent_encoding::percent_decode_str;

/// Parse a blank-line-separated alias list.
///
/// A trailing group at end-of-file is flushed even without a final blank
/// line.
pub fn parse_alias_sets(content: &str) -> Result<AliasCatalog> {
    let mut sets = Vec::new();
    let mut current = AliasSet::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                sets.push(std::mem::take(&mut current));
            }
        } else if line.starts_with("cpe:/a:") || line.starts_with("cpe:/o:") {
            let decoded = percent_decode_str(line).decode_utf8_lossy();
            // Strip the scheme marker; guarded by the prefix checks above.
            current.0.push(decoded["cpe:/".len()..].to_string());
        }
    }
    if !current.is_empty() {
        sets.push(current);
    }

    Ok(AliasCatalog { sets })
}

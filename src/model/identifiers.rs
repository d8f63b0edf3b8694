//! Typed grouping keys for structured identifiers.
//!
//! A structured identifier is a colon-delimited string naming a class,
//! vendor, product, and version plus optional qualifiers, e.g.
//! `cpe:/o:linux:linux_kernel:3.10.0:~~~~arm64~`. Keying splits it into a
//! grouping key, the canonical prefix stored in the catalog, and the
//! version suffix carried by the member. The grouping granularity is an
//! explicit per-invocation policy, not a per-feed convention.

use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::fmt;

/// Identifier scheme marker stripped from stored prefixes.
const SCHEME_MARKER: &str = "cpe:/";

/// Grouping key for a set of identifier records.
///
/// Equality is exact string equality; case is preserved from the source
/// identifier. The key is never written to the catalog — only the
/// canonical prefix is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey(String);

impl GroupKey {
    /// Key value, e.g. `/o:linux:linux_kernel`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many identifier segments form the grouping key.
///
/// Observed catalog variants differ here for reasons not evident from
/// structure alone, so the policy is a parameter of the conversion rather
/// than something inferred from the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDepth {
    /// Group by class + vendor + product.
    #[default]
    VendorProduct,
    /// Group by class + vendor + product + leading version segment.
    VendorProductVersion,
}

/// Result of keying one structured identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedIdentifier {
    /// Grouping key for the record.
    pub key: GroupKey,
    /// Identifier minus the scheme marker, up to the key depth. This is
    /// what the catalog stores for the group.
    pub canonical_prefix: String,
    /// Identifier remainder not covered by the key; may encode a version
    /// plus edition/architecture qualifiers.
    pub version_suffix: String,
    /// The member's numeric version segment, used by the name stripper.
    /// `None` when no version numeral is extractable.
    pub version_literal: Option<String>,
}

/// Derive the grouping key and canonical prefix from a structured
/// identifier.
///
/// Returns `None` — a normal filtering outcome, not an error — when the
/// identifier's class segment is neither the application (`/a`) nor the
/// operating-system (`/o`) marker, or when it has too few segments to form
/// a key at the requested depth. Percent-escapes are decoded before
/// splitting.
pub fn key_identifier(identifier: &str, depth: KeyDepth) -> Option<KeyedIdentifier> {
    let decoded = percent_decode_str(identifier).decode_utf8_lossy();
    let segments: Vec<&str> = decoded.split(':').collect();

    if segments.len() < 4 {
        return None;
    }
    if segments[1] != "/a" && segments[1] != "/o" {
        return None;
    }

    let key_end = match depth {
        KeyDepth::VendorProduct => 4,
        KeyDepth::VendorProductVersion => 5,
    };
    if segments.len() < key_end {
        return None;
    }

    let key = GroupKey(segments[1..key_end].join(":"));
    let canonical_prefix = segments[..key_end]
        .join(":")
        .strip_prefix(SCHEME_MARKER)
        .map(str::to_string)?;
    let version_suffix = segments[key_end..].join(":");

    // The stripper needs the version segment even when the key absorbs it.
    let version_segment = segments.get(4).copied().unwrap_or("");
    let version_lit = version_literal(version_segment).map(str::to_string);

    Some(KeyedIdentifier {
        key,
        canonical_prefix,
        version_suffix,
        version_literal: version_lit,
    })
}

/// Extract the version numeral from a version segment.
///
/// A segment qualifies when it contains at least one ASCII digit; records
/// without an extractable numeral are skipped by the builder.
pub fn version_literal(segment: &str) -> Option<&str> {
    if segment.bytes().any(|b| b.is_ascii_digit()) {
        Some(segment)
    } else {
        None
    }
}

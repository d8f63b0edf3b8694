//! Grouped identifier-dictionary model and its builder.

use crate::model::identifiers::{key_identifier, GroupKey, KeyDepth};
use crate::normalize::{reduce, tokenize, TokenStripper};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One raw feed record, as produced by a source adapter.
///
/// Records are transient: the builder consumes them immediately into
/// groups and members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Structured identifier, e.g. `cpe:/o:linux:linux_kernel:3.10.0`.
    pub identifier: String,
    /// Free-text product title for this version.
    pub display_name: String,
}

impl RawRecord {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

/// One version-specific record within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Identifier remainder not covered by the group key.
    pub version_suffix: String,
    /// Original title for this version.
    pub display_name: String,
    /// Residue tokens after stripping invariant tokens and the version
    /// numeral; may be empty.
    pub distinguishing_tokens: Vec<String>,
}

/// A set of identifier records sharing a grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Shortest identifier prefix shared by all members, minus the scheme
    /// marker.
    pub canonical_prefix: String,
    /// Tokens present in every member's title, in first-occurrence order.
    pub tokens: Vec<String>,
    /// Members in input order; never empty in a finalized catalog.
    pub members: Vec<Member>,
}

/// The complete grouped model for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryCatalog {
    pub groups: Vec<Group>,
}

/// Counters for one build, reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records offered to the builder.
    pub records_seen: usize,
    /// Records excluded by per-record filtering.
    pub records_skipped: usize,
}

/// Member state accumulated before reduction.
struct PendingMember {
    version_suffix: String,
    display_name: String,
    version_literal: String,
    tokens: Vec<String>,
}

struct PendingGroup {
    canonical_prefix: String,
    members: Vec<PendingMember>,
}

/// Explicit accumulator for the grouping stage.
///
/// The builder is a plain value owned by the run — feeding it records and
/// finalizing it has no effect on any other builder, so conversions are
/// re-entrant and testable in isolation.
pub struct CatalogBuilder {
    key_depth: KeyDepth,
    groups: IndexMap<GroupKey, PendingGroup>,
    stats: BuildStats,
}

impl CatalogBuilder {
    /// Create a builder with the given grouping granularity.
    pub fn new(key_depth: KeyDepth) -> Self {
        Self {
            key_depth,
            groups: IndexMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Offer one raw record to the builder.
    ///
    /// Records with a filtered identifier class or without an extractable
    /// version numeral are skipped silently (counted, logged at debug).
    pub fn push(&mut self, record: RawRecord) {
        self.stats.records_seen += 1;

        let Some(keyed) = key_identifier(&record.identifier, self.key_depth) else {
            self.stats.records_skipped += 1;
            debug!(identifier = %record.identifier, "skipping record: filtered identifier class");
            return;
        };
        let Some(version_literal) = keyed.version_literal else {
            self.stats.records_skipped += 1;
            debug!(identifier = %record.identifier, "skipping record: no version numeral");
            return;
        };

        let tokens = tokenize(&record.display_name);
        let group = self
            .groups
            .entry(keyed.key)
            .or_insert_with(|| PendingGroup {
                canonical_prefix: keyed.canonical_prefix,
                members: Vec::new(),
            });
        group.members.push(PendingMember {
            version_suffix: keyed.version_suffix,
            display_name: record.display_name,
            version_literal,
            tokens,
        });
    }

    /// Offer every record of an iterator to the builder.
    pub fn extend<I: IntoIterator<Item = RawRecord>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }

    /// Build statistics so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Reduce and strip every group, producing the finished catalog.
    ///
    /// Groups are independent, so reduction runs in parallel; the indexed
    /// collect restores input order, keeping output deterministic. Groups
    /// left without members are dropped rather than encoded empty.
    pub fn finalize(self) -> (DictionaryCatalog, BuildStats) {
        let pending: Vec<PendingGroup> = self.groups.into_values().collect();

        let groups: Vec<Group> = pending
            .into_par_iter()
            .filter(|group| !group.members.is_empty())
            .map(finalize_group)
            .collect();

        (DictionaryCatalog { groups }, self.stats)
    }
}

/// Reduce one group's token sets and strip each member's title.
fn finalize_group(pending: PendingGroup) -> Group {
    let token_sets: Vec<HashSet<String>> = pending
        .members
        .iter()
        .map(|member| member.tokens.iter().cloned().collect())
        .collect();
    let invariant = reduce(&token_sets);

    // Invariant list order: first occurrence across members, deduplicated.
    let mut tokens: Vec<String> = Vec::with_capacity(invariant.len());
    for member in &pending.members {
        for token in &member.tokens {
            if invariant.contains(token) && !tokens.iter().any(|t| t == token) {
                tokens.push(token.clone());
            }
        }
    }

    let stripper = TokenStripper::new(&tokens);
    let members = pending
        .members
        .into_iter()
        .map(|member| {
            let (_, distinguishing_tokens) =
                stripper.strip(&member.display_name, &member.version_literal);
            Member {
                version_suffix: member.version_suffix,
                display_name: member.display_name,
                distinguishing_tokens,
            }
        })
        .collect();

    Group {
        canonical_prefix: pending.canonical_prefix,
        tokens,
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(records: &[(&str, &str)]) -> DictionaryCatalog {
        let mut builder = CatalogBuilder::new(KeyDepth::VendorProduct);
        builder.extend(
            records
                .iter()
                .map(|(id, name)| RawRecord::new(*id, *name)),
        );
        builder.finalize().0
    }

    #[test]
    fn test_linux_kernel_scenario() {
        let catalog = build(&[
            ("cpe:/o:linux:linux_kernel:3.10.0", "Linux Kernel 3.10.0"),
            (
                "cpe:/o:linux:linux_kernel:3.10.0:~~~~arm64~",
                "Linux Kernel 3.10.0 on ARM64 architecture",
            ),
        ]);

        assert_eq!(catalog.groups.len(), 1);
        let group = &catalog.groups[0];
        assert_eq!(group.canonical_prefix, "o:linux:linux_kernel");
        assert_eq!(group.tokens, vec!["linux", "kernel"]);
        assert_eq!(group.members.len(), 2);
        assert!(group.members[0].distinguishing_tokens.is_empty());
        assert_eq!(
            group.members[1].distinguishing_tokens,
            vec!["on", "arm64", "architecture"]
        );
    }

    #[test]
    fn test_single_member_group_keeps_full_token_set() {
        let catalog = build(&[("cpe:/a:igor_sysoev:nginx:0.1.0", "Nginx 0.1.0")]);

        assert_eq!(catalog.groups.len(), 1);
        let group = &catalog.groups[0];
        assert_eq!(group.tokens, vec!["nginx"]);
        assert!(group.members[0].distinguishing_tokens.is_empty());
    }

    #[test]
    fn test_groups_keep_input_order() {
        let catalog = build(&[
            ("cpe:/a:vendor_b:second:1.0", "Second 1.0"),
            ("cpe:/a:vendor_a:first:1.0", "First 1.0"),
            ("cpe:/a:vendor_b:second:2.0", "Second 2.0"),
        ]);

        let prefixes: Vec<&str> = catalog
            .groups
            .iter()
            .map(|g| g.canonical_prefix.as_str())
            .collect();
        assert_eq!(prefixes, vec!["a:vendor_b:second", "a:vendor_a:first"]);
        assert_eq!(catalog.groups[0].members.len(), 2);
    }

    #[test]
    fn test_member_order_is_input_order() {
        let catalog = build(&[
            ("cpe:/a:v:p:2.0", "P 2.0"),
            ("cpe:/a:v:p:1.0", "P 1.0"),
            ("cpe:/a:v:p:3.0", "P 3.0"),
        ]);
        let suffixes: Vec<&str> = catalog.groups[0]
            .members
            .iter()
            .map(|m| m.version_suffix.as_str())
            .collect();
        assert_eq!(suffixes, vec!["2.0", "1.0", "3.0"]);
    }

    #[test]
    fn test_skipped_records_counted_not_grouped() {
        let mut builder = CatalogBuilder::new(KeyDepth::VendorProduct);
        builder.push(RawRecord::new("cpe:/h:cisco:router:1.0", "Cisco Router"));
        builder.push(RawRecord::new("cpe:/a:vendor:product", "No Version"));
        builder.push(RawRecord::new("cpe:/a:vendor:product:1.0", "Product 1.0"));

        let (catalog, stats) = builder.finalize();
        assert_eq!(stats.records_seen, 3);
        assert_eq!(stats.records_skipped, 2);
        assert_eq!(catalog.groups.len(), 1);
    }

    #[test]
    fn test_intersection_shrinks_with_divergent_titles() {
        let catalog = build(&[
            ("cpe:/a:v:p:1.0", "Acme Widget Server 1.0"),
            ("cpe:/a:v:p:2.0", "Acme Widget 2.0"),
        ]);
        let group = &catalog.groups[0];
        assert_eq!(group.tokens, vec!["acme", "widget"]);
        // "server" is no longer invariant, so it distinguishes member one.
        assert_eq!(group.members[0].distinguishing_tokens, vec!["server"]);
        assert!(group.members[1].distinguishing_tokens.is_empty());
    }

    #[test]
    fn test_version_depth_splits_minor_lines() {
        let mut builder = CatalogBuilder::new(KeyDepth::VendorProductVersion);
        builder.push(RawRecord::new("cpe:/a:v:p:1.0:update1", "P 1.0 Update 1"));
        builder.push(RawRecord::new("cpe:/a:v:p:2.0:update1", "P 2.0 Update 1"));
        let (catalog, _) = builder.finalize();

        assert_eq!(catalog.groups.len(), 2);
        assert_eq!(catalog.groups[0].canonical_prefix, "a:v:p:1.0");
        assert_eq!(catalog.groups[1].canonical_prefix, "a:v:p:2.0");
    }
}

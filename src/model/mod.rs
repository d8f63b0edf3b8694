//! Data model for conversion runs.
//!
//! [`identifiers`] derives typed grouping keys from structured identifiers,
//! [`catalog`] owns the grouped dictionary model and its builder, and
//! [`records`] holds the flat per-entry models of the non-grouped catalog
//! kinds. All of it is process-local: the binary catalog is the only
//! durable artifact of a run.

pub mod catalog;
pub mod identifiers;
pub mod records;

pub use catalog::{BuildStats, CatalogBuilder, DictionaryCatalog, Group, Member, RawRecord};
pub use identifiers::{key_identifier, version_literal, GroupKey, KeyDepth, KeyedIdentifier};
pub use records::{
    AliasCatalog, AliasSet, PayloadCatalog, ProbePayload, RuleCatalog, ServiceRule, VulnCatalog,
    VulnRecord,
};

//! Run configuration for conversion commands.
//!
//! Configs are plain values built by `main.rs` from CLI arguments and
//! handed to the `cli` handlers, keeping the handlers testable without
//! argument parsing.

use crate::model::KeyDepth;
use std::path::PathBuf;

/// What a conversion run writes to its output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// The binary catalog. The only format downstream consumers read.
    #[default]
    Binary,
    /// Pretty-printed JSON of the in-memory model. Debugging aid with no
    /// compatibility contract.
    DebugJson,
}

/// Common configuration shared by every conversion command.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Raw feed path (a directory for `.pkt` payload inputs).
    pub input: PathBuf,
    /// Catalog output path.
    pub output: PathBuf,
    pub emit: EmitMode,
}

/// Configuration for the dictionary conversion.
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    pub convert: ConvertConfig,
    /// Grouping granularity policy.
    pub key_depth: KeyDepth,
}

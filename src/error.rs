//! Unified error types for feedpack-tools.
//!
//! The taxonomy mirrors the conversion lifecycle: a source that cannot be
//! read, a source that cannot be parsed, a catalog field that cannot be
//! encoded, and a sink that cannot be written. Per-record filtering (wrong
//! identifier class, no extractable version numeral) is deliberately NOT an
//! error — skipped records are counted and logged, never surfaced here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for conversion runs.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConvertError {
    /// The input path is missing or unreadable. Fatal before any processing.
    #[error("cannot read source {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The raw feed failed structural parsing.
    #[error("malformed source: {context}")]
    SourceMalformed {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// A catalog field exceeds its wire-format capacity.
    #[error("cannot encode catalog: {0}")]
    Encode(#[from] EncodeErrorKind),

    /// The output path is not creatable or writable.
    #[error("cannot write catalog {}: {source}", path.display())]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Specific parse failure kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("invalid XML structure: {0}")]
    InvalidXml(String),

    #[error("invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("unrecognized input format: {0}")]
    UnknownFormat(String),
}

/// Wire-format capacity violations detected during encoding.
///
/// The encoder rejects oversized values outright; it never wraps or
/// truncates a length or count field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeErrorKind {
    #[error("{field} is {len} bytes, exceeding the {max}-byte field limit")]
    FieldTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} count {len} exceeds the field limit of {max}")]
    CountTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Convenient Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create a malformed-source error with context.
    pub fn malformed(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::SourceMalformed {
            context: context.into(),
            source,
        }
    }

    /// Create a source-unreadable error for a path.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a sink-unwritable error for a path.
    pub fn unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkUnwritable {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure class.
    ///
    /// Codes are part of the CLI contract and documented in the command
    /// help: 1 unreadable source, 2 malformed source, 3 encoding capacity,
    /// 4 unwritable sink.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceUnreadable { .. } => exit_codes::SOURCE_UNREADABLE,
            Self::SourceMalformed { .. } => exit_codes::SOURCE_MALFORMED,
            Self::Encode(_) => exit_codes::FIELD_TOO_LARGE,
            Self::SinkUnwritable { .. } => exit_codes::SINK_UNWRITABLE,
        }
    }
}

/// Exit codes for CI integration.
pub mod exit_codes {
    /// Conversion completed and the catalog was written.
    pub const SUCCESS: i32 = 0;
    /// Input path missing or unreadable.
    pub const SOURCE_UNREADABLE: i32 = 1;
    /// Structural parse failure of the raw feed.
    pub const SOURCE_MALFORMED: i32 = 2;
    /// A string or count exceeded its wire field capacity.
    pub const FIELD_TOO_LARGE: i32 = 3;
    /// Output path not creatable or writable.
    pub const SINK_UNWRITABLE: i32 = 4;
}

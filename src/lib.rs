//! **Converters from public vulnerability-intelligence feeds to compact
//! binary catalogs.**
//!
//! `feedpack-tools` ingests heterogeneous feeds — software identifier
//! dictionaries, vulnerability databases, service-fingerprint rule sets,
//! probe payload corpora — and normalizes each into a self-describing
//! binary catalog designed for sequential, forward-only parsing by an
//! offline lookup engine.
//!
//! ## Core Concepts & Modules
//!
//! - **[`normalize`]**: the identifier-normalization core. A tokenizer
//!   extracts word tokens from product titles, a reducer intersects the
//!   token sets of all versions of a product, and a stripper removes
//!   those invariant tokens (plus the version numeral) from each title so
//!   only genuinely distinguishing words remain — `"Linux Kernel 3.10.0
//!   on ARM64 architecture"` keeps just `on arm64 architecture`.
//! - **[`model`]**: typed grouping keys, the grouped dictionary model, and
//!   [`CatalogBuilder`] — an explicit accumulator owned by the run, so
//!   conversions are re-entrant and testable in isolation.
//! - **[`codec`]**: the binary container format. Length-prefixed,
//!   type-tagged, little-endian throughout, terminated by a zero sentinel;
//!   oversized fields are rejected, never truncated. A conforming reader
//!   lives alongside the writer for round-trip validation.
//! - **[`parsers`]**: thin per-feed adapters (CPE dictionary XML, alias
//!   lists, NVD feeds, nmap probe/payload databases, Burp match rules).
//! - **[`pipeline`]**: parse → build → encode → single-shot write
//!   orchestration; a run either commits a complete catalog or fails
//!   outright.
//!
//! ## Example: building a dictionary catalog in memory
//!
//! ```
//! use feedpack_tools::codec::encode_dictionary;
//! use feedpack_tools::model::{CatalogBuilder, KeyDepth, RawRecord};
//!
//! let mut builder = CatalogBuilder::new(KeyDepth::VendorProduct);
//! builder.push(RawRecord::new(
//!     "cpe:/o:linux:linux_kernel:3.10.0",
//!     "Linux Kernel 3.10.0",
//! ));
//! builder.push(RawRecord::new(
//!     "cpe:/o:linux:linux_kernel:3.10.0:~~~~arm64~",
//!     "Linux Kernel 3.10.0 on ARM64 architecture",
//! ));
//!
//! let (catalog, stats) = builder.finalize();
//! assert_eq!(catalog.groups.len(), 1);
//! assert_eq!(catalog.groups[0].tokens, vec!["linux", "kernel"]);
//! assert_eq!(stats.records_skipped, 0);
//!
//! let bytes = encode_dictionary(&catalog)?;
//! assert_eq!(&bytes[..4], &[1, 0, 1, 0]); // package type 1, version 1
//! # Ok::<(), feedpack_tools::error::ConvertError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parsers;
pub mod pipeline;

// Re-export main types for convenience
pub use codec::{decode_dictionary, encode_dictionary, PackageType, PACKAGE_VERSION};
pub use config::{ConvertConfig, DictionaryConfig, EmitMode};
pub use error::{ConvertError, Result};
pub use model::{CatalogBuilder, DictionaryCatalog, Group, KeyDepth, Member, RawRecord};
pub use normalize::{reduce, tokenize, TokenStripper};
pub use pipeline::ConvertSummary;

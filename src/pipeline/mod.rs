//! Conversion pipeline orchestration.
//!
//! One function per catalog kind, each the same shape: read the source
//! fully, parse it, build the model, encode (or debug-dump), then commit
//! the output in a single write. There is no partial delivery — encoding
//! happens entirely in memory, so a failed run never leaves a
//! half-written catalog behind on the encode path, and any non-clean exit
//! means the output is invalid.

use crate::codec;
use crate::config::{ConvertConfig, DictionaryConfig, EmitMode};
use crate::error::{ConvertError, ParseErrorKind, Result};
use crate::model::{BuildStats, CatalogBuilder};
use crate::parsers::{
    detect_rule_format, parse_alias_sets, parse_burp_rules, parse_cpe_dictionary,
    parse_payload_db, parse_payload_dir, parse_service_probes, parse_vuln_feed, RuleFormat,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of a successful conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Entries written to the catalog header.
    pub entries: usize,
    /// Bytes committed to the output.
    pub bytes_written: usize,
    /// Builder statistics; only the dictionary pipeline populates this.
    pub build_stats: Option<BuildStats>,
}

/// Convert a CPE dictionary into a grouped identifier dictionary catalog.
pub fn convert_dictionary(config: &DictionaryConfig) -> Result<ConvertSummary> {
    info!(input = %config.convert.input.display(), "parsing identifier dictionary");
    let content = read_source(&config.convert.input)?;
    let records = parse_cpe_dictionary(&content)?;

    let mut builder = CatalogBuilder::new(config.key_depth);
    builder.extend(records);
    let (catalog, stats) = builder.finalize();
    debug!(
        groups = catalog.groups.len(),
        skipped = stats.records_skipped,
        "dictionary build complete"
    );

    let bytes = emit(config.convert.emit, &catalog, || {
        codec::encode_dictionary(&catalog)
    })?;
    let summary = write_catalog(&config.convert.output, &bytes, catalog.groups.len())?;
    Ok(ConvertSummary {
        build_stats: Some(stats),
        ..summary
    })
}

/// Convert an identifier alias list into an alias catalog.
pub fn convert_aliases(config: &ConvertConfig) -> Result<ConvertSummary> {
    info!(input = %config.input.display(), "parsing identifier alias list");
    let content = read_source(&config.input)?;
    let catalog = parse_alias_sets(&content)?;

    let bytes = emit(config.emit, &catalog, || codec::encode_aliases(&catalog))?;
    write_catalog(&config.output, &bytes, catalog.sets.len())
}

/// Convert a vulnerability feed into a vulnerability catalog.
pub fn convert_vulns(config: &ConvertConfig) -> Result<ConvertSummary> {
    info!(input = %config.input.display(), "parsing vulnerability feed");
    let content = read_source(&config.input)?;
    let catalog = parse_vuln_feed(&content)?;

    let bytes = emit(config.emit, &catalog, || codec::encode_vulns(&catalog))?;
    write_catalog(&config.output, &bytes, catalog.records.len())
}

/// Convert service match rules (nmap probes or Burp export, auto-detected)
/// into a rule catalog.
pub fn convert_rules(config: &ConvertConfig) -> Result<ConvertSummary> {
    info!(input = %config.input.display(), "parsing service match rules");
    let content = read_source(&config.input)?;

    let format = detect_rule_format(&content).ok_or_else(|| {
        ConvertError::malformed(
            "service match rules",
            ParseErrorKind::UnknownFormat(
                "neither nmap service-probes directives nor tab-separated rules".to_string(),
            ),
        )
    })?;
    debug!(?format, "detected rule input flavor");

    let catalog = match format {
        RuleFormat::NmapProbes => parse_service_probes(&content)?,
        RuleFormat::BurpRules => parse_burp_rules(&content)?,
    };

    let bytes = emit(config.emit, &catalog, || codec::encode_rules(&catalog))?;
    write_catalog(&config.output, &bytes, catalog.rules.len())
}

/// Convert probe payloads into a payload catalog.
///
/// A directory input is treated as zmap-style `.pkt` files; a file input
/// as the nmap payload database.
pub fn convert_payloads(config: &ConvertConfig) -> Result<ConvertSummary> {
    info!(input = %config.input.display(), "parsing probe payloads");
    let catalog = if config.input.is_dir() {
        parse_payload_dir(&config.input)?
    } else {
        let content = read_source(&config.input)?;
        parse_payload_db(&content)?
    };

    let bytes = emit(config.emit, &catalog, || codec::encode_payloads(&catalog))?;
    write_catalog(&config.output, &bytes, catalog.payloads.len())
}

// ============================================================================
// Shared stages
// ============================================================================

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ConvertError::unreadable(path, e))
}

/// Render the output bytes for the selected emit mode.
fn emit<T, F>(mode: EmitMode, model: &T, encode: F) -> Result<Vec<u8>>
where
    T: Serialize,
    F: FnOnce() -> Result<Vec<u8>>,
{
    match mode {
        EmitMode::Binary => encode(),
        // The model is plain strings, numbers, and vectors; JSON
        // serialization cannot fail on it.
        EmitMode::DebugJson => {
            Ok(serde_json::to_vec_pretty(model).expect("model serializes to JSON"))
        }
    }
}

/// Commit the finished catalog in one write.
fn write_catalog(path: &Path, bytes: &[u8], entries: usize) -> Result<ConvertSummary> {
    info!(output = %path.display(), entries, "writing catalog");
    std::fs::write(path, bytes).map_err(|e| ConvertError::unwritable(path, e))?;
    Ok(ConvertSummary {
        entries,
        bytes_written: bytes.len(),
        build_stats: None,
    })
}

//! CLI command handlers.
//!
//! Thin, testable wrappers over the pipeline functions, invoked by
//! `main.rs` after argument parsing. Each handler runs one conversion to
//! completion and reports the outcome; exit-code mapping stays in
//! `main.rs`.

use crate::config::{ConvertConfig, DictionaryConfig};
use crate::error::Result;
use crate::pipeline::{self, ConvertSummary};
use tracing::info;

/// Run the `dictionary` subcommand.
pub fn run_dictionary(config: DictionaryConfig) -> Result<ConvertSummary> {
    let summary = pipeline::convert_dictionary(&config)?;
    report(&summary);
    Ok(summary)
}

/// Run the `aliases` subcommand.
pub fn run_aliases(config: ConvertConfig) -> Result<ConvertSummary> {
    let summary = pipeline::convert_aliases(&config)?;
    report(&summary);
    Ok(summary)
}

/// Run the `vulns` subcommand.
pub fn run_vulns(config: ConvertConfig) -> Result<ConvertSummary> {
    let summary = pipeline::convert_vulns(&config)?;
    report(&summary);
    Ok(summary)
}

/// Run the `service-rules` subcommand.
pub fn run_service_rules(config: ConvertConfig) -> Result<ConvertSummary> {
    let summary = pipeline::convert_rules(&config)?;
    report(&summary);
    Ok(summary)
}

/// Run the `payloads` subcommand.
pub fn run_payloads(config: ConvertConfig) -> Result<ConvertSummary> {
    let summary = pipeline::convert_payloads(&config)?;
    report(&summary);
    Ok(summary)
}

fn report(summary: &ConvertSummary) {
    match summary.build_stats {
        Some(stats) => info!(
            entries = summary.entries,
            bytes = summary.bytes_written,
            records = stats.records_seen,
            skipped = stats.records_skipped,
            "catalog written"
        ),
        None => info!(
            entries = summary.entries,
            bytes = summary.bytes_written,
            "catalog written"
        ),
    }
}

//! Per-feed source adapters.
//!
//! Each adapter turns one raw feed format into the flat record sequence
//! the core consumes. Adapters are deliberately thin: they do the minimum
//! parsing required to extract records and leave normalization, grouping,
//! and encoding to the core. Structural failures map to
//! [`SourceMalformed`](crate::error::ConvertError::SourceMalformed);
//! anything subtler is a per-record skip inside the core, not an adapter
//! concern.
//!
//! Service-rule inputs come in two flavors (nmap `service-probes` and
//! Burp tab-separated match rules); [`detect_rule_format`] sniffs the
//! content so the CLI needs no format flag.

mod burp_rules;
mod cpe_aliases;
mod cpe_dict;
mod nmap_payloads;
mod nmap_probes;
mod nvd_cve;

pub use burp_rules::parse_burp_rules;
pub use cpe_aliases::parse_alias_sets;
pub use cpe_dict::parse_cpe_dictionary;
pub use nmap_payloads::{parse_payload_db, parse_payload_dir};
pub use nmap_probes::parse_service_probes;
pub use nvd_cve::parse_vuln_feed;

/// Detected flavor of a service-rule input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    /// nmap `service-probes` database (`Probe`/`match` directives).
    NmapProbes,
    /// Burp-style tab-separated match rules.
    BurpRules,
}

/// Sniff which service-rule flavor `content` holds.
///
/// nmap databases carry `Probe`/`match` directives at line starts; the
/// Burp export is tab-separated from the first record on. Returns `None`
/// when neither marker is present.
pub fn detect_rule_format(content: &str) -> Option<RuleFormat> {
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with("Probe ")
            || trimmed.starts_with("match ")
            || trimmed.starts_with("softmatch ")
        {
            return Some(RuleFormat::NmapProbes);
        }
        if line.contains('\t') {
            return Some(RuleFormat::BurpRules);
        }
    }
    None
}

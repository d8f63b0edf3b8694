//! Flat per-entry models for the non-grouped catalog kinds.

use serde::Serialize;

/// One set of equivalent identifiers (scheme-stripped, percent-decoded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasSet(pub Vec<String>);

impl AliasSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Alias catalog: package type 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasCatalog {
    pub sets: Vec<AliasSet>,
}

/// One vulnerability entry from a vulnerability database feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnRecord {
    /// Vulnerability id with its `CVE-` prefix stripped, e.g. `2015-4000`.
    pub id: String,
    /// Base severity split into integer part and tenths, e.g. 4.3 → (4, 3).
    pub severity: (u8, u8),
    /// Structured identifiers of affected software.
    pub affected: Vec<String>,
}

/// Vulnerability catalog: package type 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VulnCatalog {
    pub records: Vec<VulnRecord>,
}

/// One service-fingerprint match rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceRule {
    /// Match pattern applied to banner text by the lookup engine.
    pub pattern: String,
    /// Structured identifier template (may embed capture references).
    pub identifier: String,
    /// Product name template.
    pub product: String,
    /// Version template.
    pub version: String,
}

/// Service-rule catalog: package type 15.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleCatalog {
    pub rules: Vec<ServiceRule>,
}

/// One probe payload and the ports it elicits responses on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbePayload {
    /// Raw payload bytes sent on the wire.
    pub data: Vec<u8>,
    pub ports: Vec<u16>,
}

/// Probe-payload catalog: package type 10.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayloadCatalog {
    pub payloads: Vec<ProbePayload>,
}

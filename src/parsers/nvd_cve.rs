//! Vulnerability database (NVD 2.0 XML feed) adapter.
//!
//! Pulls the id, base CVSS score, and affected-software list out of each
//! feed entry. Element names keep their `vuln:`/`cvss:` prefixes as they
//! appear on the wire.

use crate::error::{ConvertError, ParseErrorKind, Result};
use crate::model::{VulnCatalog, VulnRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(rename = "vuln:cve-id")]
    id: Option<String>,
    #[serde(rename = "vuln:cvss")]
    cvss: Option<Cvss>,
    #[serde(rename = "vuln:vulnerable-software-list")]
    software: Option<SoftwareList>,
}

#[derive(Debug, Deserialize)]
struct Cvss {
    #[serde(rename = "cvss:base_metrics")]
    base_metrics: Option<BaseMetrics>,
}

#[derive(Debug, Deserialize)]
struct BaseMetrics {
    #[serde(rename = "cvss:score")]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SoftwareList {
    #[serde(rename = "vuln:product", default)]
    products: Vec<String>,
}

/// Parse an NVD 2.0 vulnerability feed.
///
/// Entries without a vulnerability id produce no record; a missing score
/// encodes as severity 0.0.
pub fn parse_vuln_feed(content: &str) -> Result<VulnCatalog> {
    let feed: Feed = quick_xml::de::from_str(content).map_err(|e| {
        ConvertError::malformed(
            "vulnerability feed",
            ParseErrorKind::InvalidXml(e.to_string()),
        )
    })?;

    let mut records = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let Some(id) = entry.id else {
            continue;
        };
        let score = entry
            .cvss
            .and_then(|c| c.base_metrics)
            .and_then(|m| m.score)
            .unwrap_or(0.0);
        let affected = entry.software.map(|s| s.products).unwrap_or_default();

        records.push(VulnRecord {
            id: id.strip_prefix("CVE-").unwrap_or(&id).to_string(),
            severity: split_severity(score),
            affected,
        });
    }

    Ok(VulnCatalog { records })
}

/// Split a CVSS score into integer part and tenths, rounding the tenths.
fn split_severity(score: f64) -> (u8, u8) {
    let clamped = score.clamp(0.0, 10.0);
    let mut major = clamped.floor() as u8;
    let mut tenths = ((clamped - clamped.floor()) * 10.0).round() as u8;
    if tenths == 10 {
        major += 1;
        tenths = 0;
    }
    (major, tenths)
}

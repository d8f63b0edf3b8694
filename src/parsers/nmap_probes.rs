//! nmap `service-probes` adapter.
//!
//! Extracts `match` directives (not `softmatch`) into service rules: the
//! banner pattern between the `m|...|` delimiters plus the version-info
//! fields trailing it (`p/…/` product, `v/…/` version, `d/…/` device type
//! as a product fallback, `cpe:/…/` structured identifier). Patterns and
//! templates are stored verbatim, capture references included — the
//! lookup engine interprets them, not the converter.

use crate::error::Result;
use crate::model::{RuleCatalog, ServiceRule};
use regex::Regex;
use std::sync::LazyLock;

/// `match <service> m|<pattern>|<flags> <version info>`
static MATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^match\s+\S+\s+m\|([^|]+)\|\S*(.*)$").expect("static regex"));

/// Version-info fields: single-letter or `cpe:` class, slash-delimited.
static INFO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(cpe:|[pvihod])/([^/]+)/").expect("static regex"));

/// Parse an nmap service-probes database into service rules.
pub fn parse_service_probes(content: &str) -> Result<RuleCatalog> {
    let mut rules = Vec::new();

    for caps in MATCH_RE.captures_iter(content) {
        let mut rule = ServiceRule {
            pattern: caps[1].to_string(),
            ..ServiceRule::default()
        };

        for info in INFO_RE.captures_iter(&caps[2]) {
            let value = &info[2];
            match &info[1] {
                "cpe:" => rule.identifier = value.to_string(),
                "p" => rule.product = value.to_string(),
                "v" => rule.version = value.to_string(),
                // Device type names the product only when nothing else did.
                "d" if rule.product.is_empty() => rule.product = value.to_string(),
                _ => {}
            }
        }

        rules.push(rule);
    }

    Ok(RuleCatalog { rules })
}

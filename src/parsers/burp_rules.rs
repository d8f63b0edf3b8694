//! Burp-style tab-separated match-rule adapter.
//!
//! Each line holds a banner pattern, the index of the capture group that
//! carries the version, and a product name. The capture index becomes a
//! `$n` version template so the rule catalog stays uniform with the nmap
//! flavor.

use crate::error::{ConvertError, ParseErrorKind, Result};
use crate::model::{RuleCatalog, ServiceRule};

/// Parse tab-separated match rules.
///
/// A non-empty line with fewer than three fields is a structural failure:
/// the export is columnar, so a short row means the feed is damaged.
pub fn parse_burp_rules(content: &str) -> Result<RuleCatalog> {
    let mut rules = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(ConvertError::malformed(
                "match-rule export",
                ParseErrorKind::InvalidRecord {
                    line: index + 1,
                    message: format!("expected 3 tab-separated fields, found {}", fields.len()),
                },
            ));
        }

        rules.push(ServiceRule {
            pattern: fields[0].to_string(),
            identifier: String::new(),
            product: fields[2].to_string(),
            version: format!("${}", fields[1]),
        });
    }

    Ok(RuleCatalog { rules })
}

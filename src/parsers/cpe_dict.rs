//! CPE dictionary XML adapter.
//!
//! Reads the official dictionary format: a `cpe-list` root holding
//! `cpe-item` elements, each with a structured identifier in its `name`
//! attribute and one or more localized `title` children.

use crate::error::{ConvertError, ParseErrorKind, Result};
use crate::model::RawRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CpeList {
    #[serde(rename = "cpe-item", default)]
    items: Vec<CpeItem>,
}

#[derive(Debug, Deserialize)]
struct CpeItem {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "title", default)]
    titles: Vec<Title>,
}

#[derive(Debug, Deserialize)]
struct Title {
    #[serde(rename = "@xml:lang")]
    lang: Option<String>,
    #[serde(rename = "$text")]
    text: Option<String>,
}

/// Parse a CPE dictionary into raw records.
///
/// Items with a single title use it as-is; multi-title items use the
/// `en-US` one. Items without a usable title produce no record.
pub fn parse_cpe_dictionary(content: &str) -> Result<Vec<RawRecord>> {
    let list: CpeList = quick_xml::de::from_str(content).map_err(|e| {
        ConvertError::malformed("CPE dictionary", ParseErrorKind::InvalidXml(e.to_string()))
    })?;

    let mut records = Vec::with_capacity(list.items.len());
    for item in list.items {
        if let Some(title) = preferred_title(&item.titles) {
            records.push(RawRecord::new(item.name, title));
        }
    }
    Ok(records)
}

fn preferred_title(titles: &[Title]) -> Option<&str> {
    let title = match titles {
        [only] => only,
        many => many
            .iter()
            .find(|t| t.lang.as_deref() == Some("en-US"))?,
    };
    title.text.as_deref()
}

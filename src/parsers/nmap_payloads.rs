//! Probe-payload adapters.
//!
//! Two sources produce the same payload catalog: the nmap payload
//! database (`udp <ports> "<data>"...` entries, with C-style escapes in
//! the quoted data) and a directory of zmap-style `.pkt` files whose
//! names carry the target port. Directory entries are processed in
//! file-name order so repeated runs emit identical catalogs.

use crate::error::{ConvertError, Result};
use crate::model::{PayloadCatalog, ProbePayload};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#.*$").expect("static regex"));

/// `udp <port>[,<port>...] "<data>" ["<data>"...]`, data possibly spread
/// over several quoted fragments on following lines.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"udp\s+((?:\d+,)*\d+)\s+((?:".+"\s*)*)"#).expect("static regex"));

static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.+)""#).expect("static regex"));

/// Port number embedded in a `.pkt` file name, e.g. `dns_53.pkt`.
static PKT_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d+)(?:\.pkt|_)").expect("static regex"));

/// Parse the nmap payload database format.
pub fn parse_payload_db(content: &str) -> Result<PayloadCatalog> {
    let stripped = COMMENT_RE.replace_all(content, " ");

    let mut payloads = Vec::new();
    for caps in ENTRY_RE.captures_iter(&stripped) {
        let ports: Vec<u16> = caps[1]
            .split(',')
            .filter_map(|p| p.trim().parse().ok())
            .collect();

        let mut escaped = String::new();
        for fragment in FRAGMENT_RE.captures_iter(&caps[2]) {
            escaped.push_str(&fragment[1]);
        }
        let data = unescape(&escaped).unwrap_or_else(|| escaped.into_bytes());

        payloads.push(ProbePayload { data, ports });
    }

    Ok(PayloadCatalog { payloads })
}

/// Parse a directory of raw `.pkt` payload files.
///
/// Files without a port number in their name are skipped; unreadable
/// files are skipped with a diagnostic rather than failing the run.
pub fn parse_payload_dir(dir: &Path) -> Result<PayloadCatalog> {
    let entries = std::fs::read_dir(dir).map_err(|e| ConvertError::unreadable(dir, e))?;

    let mut names: Vec<_> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "pkt"))
        .collect();
    names.sort();

    let mut payloads = Vec::new();
    for path in names {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        let Some(port) = PKT_PORT_RE
            .captures(&file_name)
            .and_then(|caps| caps[1].parse::<u16>().ok())
        else {
            debug!(file = %file_name, "skipping payload file: no port in name");
            continue;
        };

        match std::fs::read(&path) {
            Ok(data) => payloads.push(ProbePayload {
                data,
                ports: vec![port],
            }),
            Err(error) => {
                debug!(file = %file_name, %error, "skipping unreadable payload file");
            }
        }
    }

    Ok(PayloadCatalog { payloads })
}

/// Decode C-style escapes (`\xHH`, octal, the usual single-character
/// escapes) into raw bytes. Returns `None` on a malformed escape so the
/// caller can fall back to the raw text.
fn unescape(escaped: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(escaped.len());
    let mut bytes = escaped.bytes().peekable();

    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next()? {
            b'x' => {
                let hi = hex_digit(bytes.next()?)?;
                let lo = hex_digit(bytes.next()?)?;
                out.push(hi << 4 | lo);
            }
            d @ b'0'..=b'7' => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match bytes.peek() {
                        Some(o @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(o - b'0');
                            bytes.next();
                        }
                        _ => break,
                    }
                }
                out.push(u8::try_from(value).ok()?);
            }
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'v' => out.push(0x0b),
            b'\\' => out.push(b'\\'),
            b'"' => out.push(b'"'),
            b'\'' => out.push(b'\''),
            _ => return None,
        }
    }
    Some(out)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

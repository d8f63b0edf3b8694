//! Forward-only catalog decoders.
//!
//! A conforming implementation of the reader side of the container
//! contract: consume the header, exactly `entry_count` entries, then the
//! zero sentinel. Used by the round-trip tests and available to downstream
//! validation tooling. Any mis-sized length or count upstream surfaces as
//! a truncation or a non-zero sentinel before or at the trailer.

use crate::codec::SENTINEL;
use crate::model::{
    AliasCatalog, AliasSet, PayloadCatalog, ProbePayload, RuleCatalog, ServiceRule, VulnCatalog,
    VulnRecord,
};
use thiserror::Error;

/// Decode-side failures. A catalog that trips any of these must be treated
/// as corrupt in its entirety.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("truncated catalog at {context} (need {need} bytes at offset {offset}, have {have})")]
    Truncated {
        context: &'static str,
        need: usize,
        offset: usize,
        have: usize,
    },

    #[error("missing end-of-stream sentinel: read {value:#010x} at offset {offset}")]
    BadSentinel { value: u32, offset: usize },

    #[error("unexpected package type {found} (expected {expected})")]
    UnexpectedPackageType { found: u16, expected: u16 },

    #[error("invalid UTF-8 in {context} at offset {offset}")]
    InvalidUtf8 { context: &'static str, offset: usize },
}

/// Fixed catalog header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub package_type: u16,
    pub package_version: u16,
    pub entry_count: u32,
}

/// Little-endian cursor over a catalog byte stream.
#[derive(Debug)]
pub struct PackReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PackReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the stream.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn ensure(&self, need: usize, context: &'static str) -> Result<(), DecodeError> {
        if self.pos + need > self.data.len() {
            return Err(DecodeError::Truncated {
                context,
                need,
                offset: self.pos,
                have: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        self.ensure(1, context)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        self.ensure(2, context)?;
        let value = u16::from_le_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.ensure(4, context)?;
        let value = u32::from_le_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(value)
    }

    pub fn read_bytes(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        self.ensure(len, context)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read a `u16`-length-prefixed UTF-8 string.
    pub fn read_str16(&mut self, context: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u16(context)? as usize;
        let offset = self.pos;
        let bytes = self.read_bytes(len, context)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| DecodeError::InvalidUtf8 { context, offset })
    }

    /// Consume and verify the end-of-stream sentinel.
    pub fn read_sentinel(&mut self) -> Result<(), DecodeError> {
        let offset = self.pos;
        let value = self.read_u32("sentinel")?;
        if value != SENTINEL {
            return Err(DecodeError::BadSentinel { value, offset });
        }
        Ok(())
    }
}

/// Read and return the fixed header without consuming entries.
pub fn read_header(data: &[u8]) -> Result<Header, DecodeError> {
    let mut r = PackReader::new(data);
    header(&mut r)
}

fn header(r: &mut PackReader<'_>) -> Result<Header, DecodeError> {
    Ok(Header {
        package_type: r.read_u16("package type")?,
        package_version: r.read_u16("package version")?,
        entry_count: r.read_u32("entry count")?,
    })
}

fn expect_type(found: u16, expected: u16) -> Result<(), DecodeError> {
    if found != expected {
        return Err(DecodeError::UnexpectedPackageType { found, expected });
    }
    Ok(())
}

// ============================================================================
// Package type 1: grouped identifier dictionary
// ============================================================================

/// Wire-level view of a decoded dictionary member. Display names are not
/// part of the container format, so only the encoded fields appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMember {
    pub version_suffix: String,
    pub distinguishing_tokens: Vec<String>,
}

/// Wire-level view of a decoded dictionary group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedGroup {
    pub canonical_prefix: String,
    pub tokens: Vec<String>,
    pub members: Vec<DecodedMember>,
}

/// A fully decoded identifier dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDictionary {
    pub package_version: u16,
    pub groups: Vec<DecodedGroup>,
}

/// Decode a grouped identifier dictionary (package type 1).
pub fn decode_dictionary(data: &[u8]) -> Result<DecodedDictionary, DecodeError> {
    let mut r = PackReader::new(data);
    let hdr = header(&mut r)?;
    expect_type(hdr.package_type, 1)?;

    let mut groups = Vec::with_capacity(hdr.entry_count as usize);
    for _ in 0..hdr.entry_count {
        let canonical_prefix = r.read_str16("canonical prefix")?;

        let token_count = r.read_u8("token count")?;
        let mut tokens = Vec::with_capacity(token_count as usize);
        for _ in 0..token_count {
            tokens.push(r.read_str16("invariant token")?);
        }

        let member_count = r.read_u32("member count")?;
        let mut members = Vec::with_capacity(member_count as usize);
        for _ in 0..member_count {
            let version_suffix = r.read_str16("version suffix")?;
            let residue_count = r.read_u8("residue token count")?;
            let mut distinguishing_tokens = Vec::with_capacity(residue_count as usize);
            for _ in 0..residue_count {
                distinguishing_tokens.push(r.read_str16("residue token")?);
            }
            members.push(DecodedMember {
                version_suffix,
                distinguishing_tokens,
            });
        }

        groups.push(DecodedGroup {
            canonical_prefix,
            tokens,
            members,
        });
    }

    r.read_sentinel()?;
    Ok(DecodedDictionary {
        package_version: hdr.package_version,
        groups,
    })
}

// ============================================================================
// Flat catalog kinds
// ============================================================================

/// Decode flat identifier alias sets (package type 2).
pub fn decode_aliases(data: &[u8]) -> Result<AliasCatalog, DecodeError> {
    let mut r = PackReader::new(data);
    let hdr = header(&mut r)?;
    expect_type(hdr.package_type, 2)?;

    let mut sets = Vec::with_capacity(hdr.entry_count as usize);
    for _ in 0..hdr.entry_count {
        let alias_count = r.read_u16("alias count")?;
        let mut aliases = Vec::with_capacity(alias_count as usize);
        for _ in 0..alias_count {
            aliases.push(r.read_str16("alias")?);
        }
        sets.push(AliasSet(aliases));
    }

    r.read_sentinel()?;
    Ok(AliasCatalog { sets })
}

/// Decode a flat vulnerability database (package type 3).
pub fn decode_vulns(data: &[u8]) -> Result<VulnCatalog, DecodeError> {
    let mut r = PackReader::new(data);
    let hdr = header(&mut r)?;
    expect_type(hdr.package_type, 3)?;

    let mut records = Vec::with_capacity(hdr.entry_count as usize);
    for _ in 0..hdr.entry_count {
        // Field count lets older readers skip fields they do not know.
        let _field_count = r.read_u8("field count")?;

        let id = r.read_str16("vulnerability id")?;

        let severity_len = r.read_u8("severity length")?;
        let severity_bytes = r.read_bytes(severity_len as usize, "severity")?;
        let severity = match severity_bytes {
            [major, tenths, ..] => (*major, *tenths),
            _ => (0, 0),
        };

        let affected_count = r.read_u16("affected count")?;
        let mut affected = Vec::with_capacity(affected_count as usize);
        for _ in 0..affected_count {
            affected.push(r.read_str16("affected identifier")?);
        }

        records.push(VulnRecord {
            id,
            severity,
            affected,
        });
    }

    r.read_sentinel()?;
    Ok(VulnCatalog { records })
}

/// Decode flat probe payloads (package type 10).
pub fn decode_payloads(data: &[u8]) -> Result<PayloadCatalog, DecodeError> {
    let mut r = PackReader::new(data);
    let hdr = header(&mut r)?;
    expect_type(hdr.package_type, 10)?;

    let mut payloads = Vec::with_capacity(hdr.entry_count as usize);
    for _ in 0..hdr.entry_count {
        let data_len = r.read_u16("payload length")?;
        let data = r.read_bytes(data_len as usize, "payload data")?.to_vec();
        let port_count = r.read_u16("port count")?;
        let mut ports = Vec::with_capacity(port_count as usize);
        for _ in 0..port_count {
            ports.push(r.read_u16("port")?);
        }
        payloads.push(ProbePayload { data, ports });
    }

    r.read_sentinel()?;
    Ok(PayloadCatalog { payloads })
}

/// Decode flat service match rules (package type 15).
pub fn decode_rules(data: &[u8]) -> Result<RuleCatalog, DecodeError> {
    let mut r = PackReader::new(data);
    let hdr = header(&mut r)?;
    expect_type(hdr.package_type, 15)?;

    let mut rules = Vec::with_capacity(hdr.entry_count as usize);
    for _ in 0..hdr.entry_count {
        rules.push(ServiceRule {
            pattern: r.read_str16("rule pattern")?,
            identifier: r.read_str16("rule identifier")?,
            product: r.read_str16("rule product")?,
            version: r.read_str16("rule version")?,
        });
    }

    r.read_sentinel()?;
    Ok(RuleCatalog { rules })
}

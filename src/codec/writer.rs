//! Catalog encoders.
//!
//! [`PackWriter`] provides checked little-endian primitives; the
//! `encode_*` functions compose the per-package-type layouts from them.
//! Every length and count is validated against its field width — a string
//! that does not fit is a hard [`EncodeErrorKind::FieldTooLarge`] failure,
//! never a silent truncation. Encoders return the complete byte vector so
//! callers can commit the catalog in a single write.

use crate::codec::{PackageType, PACKAGE_VERSION, SENTINEL};
use crate::error::{EncodeErrorKind, Result};
use crate::model::{AliasCatalog, DictionaryCatalog, PayloadCatalog, RuleCatalog, VulnCatalog};

// ============================================================================
// Checked wire primitives
// ============================================================================

/// Little-endian byte-stream writer with width-checked fields.
#[derive(Debug, Default)]
pub struct PackWriter {
    buf: Vec<u8>,
}

impl PackWriter {
    /// Start a catalog stream with its fixed header.
    pub fn with_header(package_type: PackageType, entry_count: usize) -> Result<Self> {
        let mut writer = Self { buf: Vec::new() };
        writer.put_u16(package_type.code());
        writer.put_u16(PACKAGE_VERSION);
        let count = checked_count::<u32>("entry", entry_count)?;
        writer.put_u32(count);
        Ok(writer)
    }

    /// Append the end-of-stream sentinel and yield the finished bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.put_u32(SENTINEL);
        self.buf
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a count that must fit in a `u8`.
    pub fn put_count8(&mut self, field: &'static str, len: usize) -> Result<()> {
        self.put_u8(checked_count::<u8>(field, len)?);
        Ok(())
    }

    /// Write a count that must fit in a `u16`.
    pub fn put_count16(&mut self, field: &'static str, len: usize) -> Result<()> {
        self.put_u16(checked_count::<u16>(field, len)?);
        Ok(())
    }

    /// Write a count that must fit in a `u32`.
    pub fn put_count32(&mut self, field: &'static str, len: usize) -> Result<()> {
        self.put_u32(checked_count::<u32>(field, len)?);
        Ok(())
    }

    /// Write a `u16` byte-length prefix followed by the raw bytes.
    pub fn put_bytes16(&mut self, field: &'static str, bytes: &[u8]) -> Result<()> {
        let len = u16::try_from(bytes.len()).map_err(|_| EncodeErrorKind::FieldTooLarge {
            field,
            len: bytes.len(),
            max: u16::MAX as usize,
        })?;
        self.put_u16(len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Write a `u16`-length-prefixed UTF-8 string. The prefix is the byte
    /// length, not the character count.
    pub fn put_str16(&mut self, field: &'static str, value: &str) -> Result<()> {
        self.put_bytes16(field, value.as_bytes())
    }
}

trait CountField: Copy {
    const MAX: usize;
    fn from_usize(len: usize) -> Self;
}

impl CountField for u8 {
    const MAX: usize = u8::MAX as usize;
    fn from_usize(len: usize) -> Self {
        len as u8
    }
}

impl CountField for u16 {
    const MAX: usize = u16::MAX as usize;
    fn from_usize(len: usize) -> Self {
        len as u16
    }
}

impl CountField for u32 {
    const MAX: usize = u32::MAX as usize;
    fn from_usize(len: usize) -> Self {
        len as u32
    }
}

fn checked_count<T: CountField>(field: &'static str, len: usize) -> Result<T> {
    if len > T::MAX {
        return Err(EncodeErrorKind::CountTooLarge {
            field,
            len,
            max: T::MAX,
        }
        .into());
    }
    Ok(T::from_usize(len))
}

// ============================================================================
// Package type 1: grouped identifier dictionary
// ============================================================================

/// Encode a grouped identifier dictionary (package type 1).
///
/// The entry count in the header reflects the groups actually written;
/// callers hand over a finalized catalog in which every group has at least
/// one member.
pub fn encode_dictionary(catalog: &DictionaryCatalog) -> Result<Vec<u8>> {
    let mut w =
        PackWriter::with_header(PackageType::IdentifierDictionary, catalog.groups.len())?;

    for group in &catalog.groups {
        w.put_str16("canonical prefix", &group.canonical_prefix)?;

        w.put_count8("invariant token", group.tokens.len())?;
        for token in &group.tokens {
            w.put_str16("invariant token", token)?;
        }

        w.put_count32("member", group.members.len())?;
        for member in &group.members {
            w.put_str16("version suffix", &member.version_suffix)?;
            w.put_count8("residue token", member.distinguishing_tokens.len())?;
            for token in &member.distinguishing_tokens {
                w.put_str16("residue token", token)?;
            }
        }
    }

    Ok(w.finish())
}

// ============================================================================
// Package type 2: identifier alias sets
// ============================================================================

/// Encode flat identifier alias sets (package type 2).
pub fn encode_aliases(catalog: &AliasCatalog) -> Result<Vec<u8>> {
    let mut w = PackWriter::with_header(PackageType::IdentifierAliases, catalog.sets.len())?;

    for set in &catalog.sets {
        w.put_count16("alias", set.0.len())?;
        for alias in &set.0 {
            w.put_str16("alias", alias)?;
        }
    }

    Ok(w.finish())
}

// ============================================================================
// Package type 3: vulnerability database
// ============================================================================

/// Number of fields in a vulnerability entry. Written per entry so a
/// forward-only reader can skip fields added by later format revisions.
const VULN_FIELD_COUNT: u8 = 3;

/// Encode a flat vulnerability database (package type 3).
pub fn encode_vulns(catalog: &VulnCatalog) -> Result<Vec<u8>> {
    let mut w =
        PackWriter::with_header(PackageType::VulnerabilityDatabase, catalog.records.len())?;

    for record in &catalog.records {
        w.put_u8(VULN_FIELD_COUNT);

        w.put_str16("vulnerability id", &record.id)?;

        // Severity: byte length, then integer part and tenths.
        w.put_u8(2);
        w.put_u8(record.severity.0);
        w.put_u8(record.severity.1);

        w.put_count16("affected software", record.affected.len())?;
        for identifier in &record.affected {
            w.put_str16("affected identifier", identifier)?;
        }
    }

    Ok(w.finish())
}

// ============================================================================
// Package type 10: probe payloads
// ============================================================================

/// Encode flat probe payloads (package type 10).
pub fn encode_payloads(catalog: &PayloadCatalog) -> Result<Vec<u8>> {
    let mut w = PackWriter::with_header(PackageType::ProbePayloads, catalog.payloads.len())?;

    for payload in &catalog.payloads {
        w.put_bytes16("payload data", &payload.data)?;
        w.put_count16("port", payload.ports.len())?;
        for port in &payload.ports {
            w.put_u16(*port);
        }
    }

    Ok(w.finish())
}

// ============================================================================
// Package type 15: service match rules
// ============================================================================

/// Encode flat service match rules (package type 15).
pub fn encode_rules(catalog: &RuleCatalog) -> Result<Vec<u8>> {
    let mut w = PackWriter::with_header(PackageType::ServiceRules, catalog.rules.len())?;

    for rule in &catalog.rules {
        w.put_str16("rule pattern", &rule.pattern)?;
        w.put_str16("rule identifier", &rule.identifier)?;
        w.put_str16("rule product", &rule.product)?;
        w.put_str16("rule version", &rule.version)?;
    }

    Ok(w.finish())
}

//! Binary catalog container format.
//!
//! Every catalog is a streaming, length-prefixed, type-tagged byte stream
//! designed for sequential forward-only parsing by a resource-constrained
//! lookup engine:
//!
//! ```text
//! Header:   u16 package_type, u16 package_version, u32 entry_count
//! Entries:  entry_count records, layout per package type
//! Trailer:  u32 0 sentinel (always present, even for empty catalogs)
//! ```
//!
//! All integers are little-endian. String lengths are byte lengths. A
//! reader consumes exactly `entry_count` entries and then verifies the
//! zero sentinel; a non-zero value there means the catalog is truncated or
//! corrupt. New package types and per-entry field counts extend the format
//! without breaking existing readers; no backward compatibility is
//! promised across major package-type redefinitions.

mod reader;
mod writer;

pub use reader::{
    decode_aliases, decode_dictionary, decode_payloads, decode_rules, decode_vulns, read_header,
    DecodeError, DecodedDictionary, DecodedGroup, DecodedMember, Header, PackReader,
};
pub use writer::{
    encode_aliases, encode_dictionary, encode_payloads, encode_rules, encode_vulns, PackWriter,
};

/// Catalog kind discriminator, first field of every header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PackageType {
    /// Grouped identifier dictionary.
    IdentifierDictionary = 1,
    /// Flat identifier alias sets.
    IdentifierAliases = 2,
    /// Flat vulnerability database.
    VulnerabilityDatabase = 3,
    /// Flat probe payloads.
    ProbePayloads = 10,
    /// Flat service match rules.
    ServiceRules = 15,
}

impl PackageType {
    /// Wire value of the discriminator.
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Format revision within each package type.
pub const PACKAGE_VERSION: u16 = 1;

/// End-of-stream sentinel value.
pub(crate) const SENTINEL: u32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_type_codes_match_wire_contract() {
        assert_eq!(PackageType::IdentifierDictionary.code(), 1);
        assert_eq!(PackageType::IdentifierAliases.code(), 2);
        assert_eq!(PackageType::VulnerabilityDatabase.code(), 3);
        assert_eq!(PackageType::ProbePayloads.code(), 10);
        assert_eq!(PackageType::ServiceRules.code(), 15);
    }
}

//! End-to-end conversion tests over real fixture files.
//!
//! These exercise the full read → parse → build → encode → write pipeline
//! for every catalog kind, plus the fatal error paths of the process
//! contract.

use feedpack_tools::codec::{
    decode_aliases, decode_dictionary, decode_payloads, decode_rules, decode_vulns,
};
use feedpack_tools::config::{ConvertConfig, DictionaryConfig, EmitMode};
use feedpack_tools::error::{exit_codes, ConvertError};
use feedpack_tools::model::KeyDepth;
use feedpack_tools::pipeline;
use std::path::{Path, PathBuf};

// ============================================================================
// Test fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn convert_config(input: PathBuf, dir: &tempfile::TempDir, emit: EmitMode) -> ConvertConfig {
    ConvertConfig {
        input,
        output: dir.path().join("out.pack"),
        emit,
    }
}

// ============================================================================
// Dictionary pipeline
// ============================================================================

mod dictionary {
    use super::*;

    #[test]
    fn converts_fixture_to_grouped_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DictionaryConfig {
            convert: convert_config(
                fixture_path("cpe/minimal-dictionary.xml"),
                &dir,
                EmitMode::Binary,
            ),
            key_depth: KeyDepth::VendorProduct,
        };

        let summary = pipeline::convert_dictionary(&config).expect("convert");
        assert_eq!(summary.entries, 3);

        let stats = summary.build_stats.expect("dictionary reports stats");
        assert_eq!(stats.records_seen, 6);
        // The hardware-class item and the versionless item are filtered.
        assert_eq!(stats.records_skipped, 2);

        let bytes = std::fs::read(&config.convert.output).expect("read output");
        assert_eq!(summary.bytes_written, bytes.len());
        let decoded = decode_dictionary(&bytes).expect("decode");

        let kernel = &decoded.groups[0];
        assert_eq!(kernel.canonical_prefix, "o:linux:linux_kernel");
        assert_eq!(kernel.tokens, vec!["linux", "kernel"]);
        assert_eq!(kernel.members.len(), 2);
        assert_eq!(kernel.members[0].version_suffix, "3.10.0");
        assert!(kernel.members[0].distinguishing_tokens.is_empty());
        assert_eq!(kernel.members[1].version_suffix, "3.10.0:~~~~arm64~");
        assert_eq!(
            kernel.members[1].distinguishing_tokens,
            vec!["on", "arm64", "architecture"]
        );

        let nginx = &decoded.groups[1];
        assert_eq!(nginx.canonical_prefix, "a:igor_sysoev:nginx");
        assert_eq!(nginx.tokens, vec!["nginx"]);
        assert!(nginx.members[0].distinguishing_tokens.is_empty());

        // Percent-escapes in the identifier decode into real separators.
        let hp = &decoded.groups[2];
        assert_eq!(hp.canonical_prefix, "a:hp:insight_diagnostics");
        assert_eq!(hp.members[0].version_suffix, "7.4.0.1570::b");
    }

    #[test]
    fn header_count_matches_groups_written_not_encountered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DictionaryConfig {
            convert: convert_config(
                fixture_path("cpe/minimal-dictionary.xml"),
                &dir,
                EmitMode::Binary,
            ),
            key_depth: KeyDepth::VendorProduct,
        };
        pipeline::convert_dictionary(&config).expect("convert");

        let bytes = std::fs::read(&config.convert.output).expect("read output");
        let decoded = decode_dictionary(&bytes).expect("decode");
        // Six items in the feed, three groups in the header.
        assert_eq!(decoded.groups.len(), 3);
        assert!(decoded.groups.iter().all(|g| !g.members.is_empty()));
    }

    #[test]
    fn key_depth_policy_changes_grouping() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DictionaryConfig {
            convert: convert_config(
                fixture_path("cpe/minimal-dictionary.xml"),
                &dir,
                EmitMode::Binary,
            ),
            key_depth: KeyDepth::VendorProductVersion,
        };
        pipeline::convert_dictionary(&config).expect("convert");

        let bytes = std::fs::read(&config.convert.output).expect("read output");
        let decoded = decode_dictionary(&bytes).expect("decode");
        // Both kernel records share the version segment, so they still
        // group together, now under a deeper prefix.
        let kernel = &decoded.groups[0];
        assert_eq!(kernel.canonical_prefix, "o:linux:linux_kernel:3.10.0");
        assert_eq!(kernel.members.len(), 2);
        assert_eq!(kernel.members[0].version_suffix, "");
        assert_eq!(kernel.members[1].version_suffix, "~~~~arm64~");
    }

    #[test]
    fn debug_mode_emits_json_model() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DictionaryConfig {
            convert: convert_config(
                fixture_path("cpe/minimal-dictionary.xml"),
                &dir,
                EmitMode::DebugJson,
            ),
            key_depth: KeyDepth::VendorProduct,
        };
        pipeline::convert_dictionary(&config).expect("convert");

        let dump = std::fs::read_to_string(&config.convert.output).expect("read output");
        let value: serde_json::Value = serde_json::from_str(&dump).expect("valid JSON");
        assert_eq!(value["groups"][0]["canonical_prefix"], "o:linux:linux_kernel");
        // The debug dump keeps display names; the binary format does not.
        assert_eq!(value["groups"][0]["members"][0]["display_name"], "Linux Kernel 3.10.0");
    }
}

// ============================================================================
// Flat catalog pipelines
// ============================================================================

mod flat_catalogs {
    use super::*;

    #[test]
    fn aliases_fixture_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(fixture_path("aliases/aliases.txt"), &dir, EmitMode::Binary);

        let summary = pipeline::convert_aliases(&config).expect("convert");
        assert_eq!(summary.entries, 3);

        let bytes = std::fs::read(&config.output).expect("read output");
        let decoded = decode_aliases(&bytes).expect("decode");
        assert_eq!(
            decoded.sets[0].0,
            vec!["a:apache:http_server:2.4.7", "a:apache:httpd:2.4.7"]
        );
        // The hardware identifier inside the second block is dropped.
        assert_eq!(decoded.sets[1].0.len(), 2);
    }

    #[test]
    fn vulns_fixture_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(fixture_path("nvd/cve-sample.xml"), &dir, EmitMode::Binary);

        let summary = pipeline::convert_vulns(&config).expect("convert");
        assert_eq!(summary.entries, 2);

        let bytes = std::fs::read(&config.output).expect("read output");
        let decoded = decode_vulns(&bytes).expect("decode");
        assert_eq!(decoded.records[0].id, "2015-4000");
        assert_eq!(decoded.records[0].severity, (4, 3));
        assert_eq!(decoded.records[0].affected.len(), 2);
        assert_eq!(decoded.records[1].severity, (5, 0));
    }

    #[test]
    fn service_rules_detects_nmap_flavor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(fixture_path("nmap/service-probes"), &dir, EmitMode::Binary);

        let summary = pipeline::convert_rules(&config).expect("convert");
        assert_eq!(summary.entries, 3);

        let bytes = std::fs::read(&config.output).expect("read output");
        let decoded = decode_rules(&bytes).expect("decode");
        assert_eq!(decoded.rules[0].product, "ProFTPD");
        assert_eq!(decoded.rules[0].identifier, "a:proftpd:proftpd:$1");
        assert_eq!(decoded.rules[2].product, "print server");
    }

    #[test]
    fn service_rules_detects_burp_flavor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(fixture_path("burp/match-rules.tsv"), &dir, EmitMode::Binary);

        let summary = pipeline::convert_rules(&config).expect("convert");
        assert_eq!(summary.entries, 3);

        let bytes = std::fs::read(&config.output).expect("read output");
        let decoded = decode_rules(&bytes).expect("decode");
        assert_eq!(decoded.rules[0].pattern, r"Server: nginx/([\d.]+)");
        assert_eq!(decoded.rules[0].version, "$1");
        assert!(decoded.rules[0].identifier.is_empty());
    }

    #[test]
    fn payloads_from_database_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(fixture_path("nmap/payloads"), &dir, EmitMode::Binary);

        let summary = pipeline::convert_payloads(&config).expect("convert");
        assert_eq!(summary.entries, 3);

        let bytes = std::fs::read(&config.output).expect("read output");
        let decoded = decode_payloads(&bytes).expect("decode");
        assert_eq!(decoded.payloads[0].ports, vec![53]);
        assert_eq!(decoded.payloads[0].data.len(), 12);
        assert_eq!(decoded.payloads[1].data.len(), 16);
        assert_eq!(decoded.payloads[2].ports, vec![7, 13, 37]);
        assert_eq!(decoded.payloads[2].data, b"ping");
    }

    #[test]
    fn payloads_from_pkt_directory() {
        let input = tempfile::tempdir().expect("tempdir");
        std::fs::write(input.path().join("udp_1194_openvpn.pkt"), [0x38, 0x01]).expect("write");
        std::fs::write(input.path().join("ntp_123.pkt"), [0xe3]).expect("write");

        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(input.path().to_path_buf(), &dir, EmitMode::Binary);

        pipeline::convert_payloads(&config).expect("convert");
        let bytes = std::fs::read(&config.output).expect("read output");
        let decoded = decode_payloads(&bytes).expect("decode");
        assert_eq!(decoded.payloads.len(), 2);
        // ntp_123 sorts before udp_1194.
        assert_eq!(decoded.payloads[0].ports, vec![123]);
        assert_eq!(decoded.payloads[1].ports, vec![1194]);
    }
}

// ============================================================================
// Fatal error paths
// ============================================================================

mod error_paths {
    use super::*;

    #[test]
    fn missing_source_is_unreadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = convert_config(PathBuf::from("/nonexistent/feed.txt"), &dir, EmitMode::Binary);

        let err = pipeline::convert_aliases(&config).expect_err("must fail");
        assert!(matches!(err, ConvertError::SourceUnreadable { .. }));
        assert_eq!(err.exit_code(), exit_codes::SOURCE_UNREADABLE);
        assert!(!config.output.exists(), "no partial output on failure");
    }

    #[test]
    fn malformed_xml_is_malformed_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("broken.xml");
        std::fs::write(&input, "<cpe-list><cpe-item name=").expect("write");
        let config = DictionaryConfig {
            convert: convert_config(input, &dir, EmitMode::Binary),
            key_depth: KeyDepth::VendorProduct,
        };

        let err = pipeline::convert_dictionary(&config).expect_err("must fail");
        assert!(matches!(err, ConvertError::SourceMalformed { .. }));
        assert_eq!(err.exit_code(), exit_codes::SOURCE_MALFORMED);
    }

    #[test]
    fn undetectable_rule_flavor_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("rules.txt");
        std::fs::write(&input, "no markers here\n").expect("write");
        let config = convert_config(input, &dir, EmitMode::Binary);

        let err = pipeline::convert_rules(&config).expect_err("must fail");
        assert!(matches!(err, ConvertError::SourceMalformed { .. }));
    }

    #[test]
    fn unwritable_sink_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ConvertConfig {
            input: fixture_path("aliases/aliases.txt"),
            output: dir.path().join("missing-subdir").join("out.pack"),
            emit: EmitMode::Binary,
        };

        let err = pipeline::convert_aliases(&config).expect_err("must fail");
        assert!(matches!(err, ConvertError::SinkUnwritable { .. }));
        assert_eq!(err.exit_code(), exit_codes::SINK_UNWRITABLE);
    }
}

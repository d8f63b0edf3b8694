//! feedpack-tools: vulnerability-intelligence feed to binary catalog
//! converters.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use feedpack_tools::{
    cli,
    config::{ConvertConfig, DictionaryConfig, EmitMode},
    model::KeyDepth,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with catalog support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nCatalog package types:",
        "\n  1   identifier dictionary (CPE XML)",
        "\n  2   identifier alias sets",
        "\n  3   vulnerability database (NVD XML)",
        "\n  10  probe payloads (nmap db or .pkt directory)",
        "\n  15  service match rules (nmap probes or Burp export)",
        "\n\nAll catalogs are little-endian, length-prefixed, sentinel-terminated."
    )
}

#[derive(Parser)]
#[command(name = "feedpack-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Vulnerability feed to binary catalog converters", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Catalog written
    1  Source missing or unreadable
    2  Source malformed
    3  Field exceeds wire-format capacity
    4  Output not writable

EXAMPLES:
    # Convert the official CPE dictionary
    feedpack-tools dictionary official-cpe-dictionary_v2.2.xml cpe.pack

    # Group minor version lines separately
    feedpack-tools dictionary --key-depth product-version cpe.xml cpe.pack

    # Inspect the in-memory model instead of encoding
    feedpack-tools service-rules --debug nmap-service-probes rules.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every conversion subcommand.
#[derive(Parser)]
struct ConvertArgs {
    /// Path to the raw feed
    input: PathBuf,

    /// Path for the binary catalog
    output: PathBuf,

    /// Write pretty-printed JSON of the parsed model instead of the
    /// binary catalog
    #[arg(long)]
    debug: bool,
}

impl ConvertArgs {
    fn into_config(self) -> ConvertConfig {
        ConvertConfig {
            input: self.input,
            output: self.output,
            emit: if self.debug {
                EmitMode::DebugJson
            } else {
                EmitMode::Binary
            },
        }
    }
}

/// Grouping granularity for the dictionary conversion.
#[derive(Clone, Copy, ValueEnum)]
enum KeyDepthArg {
    /// Group by vendor and product
    Product,
    /// Group by vendor, product, and leading version segment
    ProductVersion,
}

impl From<KeyDepthArg> for KeyDepth {
    fn from(arg: KeyDepthArg) -> Self {
        match arg {
            KeyDepthArg::Product => KeyDepth::VendorProduct,
            KeyDepthArg::ProductVersion => KeyDepth::VendorProductVersion,
        }
    }
}

/// Arguments for the `dictionary` subcommand
#[derive(Parser)]
struct DictionaryArgs {
    #[command(flatten)]
    convert: ConvertArgs,

    /// Grouping granularity
    #[arg(long, value_enum, default_value = "product")]
    key_depth: KeyDepthArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CPE dictionary (XML) to an identifier-dictionary catalog
    Dictionary(DictionaryArgs),

    /// Convert an identifier alias list to an alias catalog
    Aliases(ConvertArgs),

    /// Convert an NVD vulnerability feed (XML) to a vulnerability catalog
    Vulns(ConvertArgs),

    /// Convert service match rules (nmap probes or Burp export,
    /// auto-detected) to a rule catalog
    ServiceRules(ConvertArgs),

    /// Convert probe payloads (nmap payload db, or a directory of .pkt
    /// files) to a payload catalog
    Payloads(ConvertArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = match cli.command {
        Commands::Dictionary(args) => cli::run_dictionary(DictionaryConfig {
            convert: args.convert.into_config(),
            key_depth: args.key_depth.into(),
        }),

        Commands::Aliases(args) => cli::run_aliases(args.into_config()),

        Commands::Vulns(args) => cli::run_vulns(args.into_config()),

        Commands::ServiceRules(args) => cli::run_service_rules(args.into_config()),

        Commands::Payloads(args) => cli::run_payloads(args.into_config()),

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "feedpack-tools",
                &mut io::stdout(),
            );
            return;
        }
    };

    if let Err(err) = result {
        let code = err.exit_code();
        // {:#} prints the whole cause chain on one line.
        eprintln!("error: {:#}", anyhow::Error::new(err));
        std::process::exit(code);
    }
}

//! Lookup - Command Line Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lookup generate` | Scan a crate for `#[service_provider]` and merge descriptors |
//! | `lookup list <capability>` | Show the implementations descriptors name for a capability |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lookup::codegen::{CodegenError, EmbedIndex, GenerationReport, MergeOutcome, SourceScanner};
use lookup::infrastructure::config::ManifestConfig;
use lookup::{CapabilityId, ConfigLoader, LookupConfig, ManifestLookup, Preference, init_logging};
use serde::Serialize;
use tracing::info;

/// Command line interface for Lookup
#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Lookup - service descriptor generator and inspector")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a crate and merge its service descriptors
    Generate {
        /// Crate root (the directory holding Cargo.toml)
        #[arg(long, default_value = ".")]
        crate_dir: PathBuf,

        /// Output directory; descriptors go to <OUT>/META-INF/services
        #[arg(long)]
        out: PathBuf,

        /// Crate name used as the root namespace (default: from Cargo.toml)
        #[arg(long)]
        crate_name: Option<String>,

        /// Also write lookup_descriptors.rs for embedding
        #[arg(long)]
        embed: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the implementations named for a capability
    List {
        /// Capability identifier (`app.Greeter` or `app::Greeter`)
        capability: String,

        /// Directories holding META-INF/services (replaces the configured search path)
        #[arg(long = "search-path", value_name = "DIR")]
        search_path: Vec<PathBuf>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct Listing {
    capability: CapabilityId,
    implementations: Vec<ListedImplementation>,
}

#[derive(Debug, Serialize)]
struct ListedImplementation {
    implementation: String,
    preference: Preference,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.log_level)?;
    init_logging(&config.logging).context("failed to initialise logging")?;

    match cli.command {
        Commands::Generate {
            crate_dir,
            out,
            crate_name,
            embed,
            json,
        } => generate(&crate_dir, &out, crate_name, embed, json),
        Commands::List {
            capability,
            search_path,
            json,
        } => list(&config, &capability, search_path, json),
    }
}

fn load_config(path: Option<&Path>, log_level: Option<String>) -> Result<LookupConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("failed to load configuration")?;
    if let Some(level) = log_level {
        config.logging.level = level;
    }
    Ok(config)
}

fn generate(
    crate_dir: &Path,
    out: &Path,
    crate_name: Option<String>,
    embed: bool,
    json: bool,
) -> Result<()> {
    let scanner = match crate_name {
        Some(name) => SourceScanner::new(name),
        None => SourceScanner::for_crate(crate_dir)?,
    };
    let report = lookup::codegen::generate_crate(&scanner, crate_dir, out)
        .with_context(|| format!("descriptor generation failed for {}", crate_dir.display()))?;

    if embed {
        let index = EmbedIndex::new(scanner.crate_name()).write(out)?;
        info!(path = %index.display(), "Wrote descriptor index");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.has_errors() {
        return Err(CodegenError::Rejected {
            count: report.error_count(),
        }
        .into());
    }
    Ok(())
}

fn print_report(report: &GenerationReport) {
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    for outcome in &report.descriptors {
        match outcome {
            MergeOutcome::Written { path, added } => {
                println!("wrote     {} (+{added})", path.display());
            }
            MergeOutcome::Unchanged { path } => println!("unchanged {}", path.display()),
        }
    }
}

fn list(
    config: &LookupConfig,
    capability: &str,
    search_path: Vec<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut manifest: ManifestConfig = config.manifest.clone();
    if !search_path.is_empty() {
        manifest.search_path = search_path;
    }

    let capability = CapabilityId::new(capability);
    let descriptor = ManifestLookup::from_config(&manifest).descriptor(&capability);
    let listing = Listing {
        implementations: descriptor
            .identifiers()
            .map(|implementation| ListedImplementation {
                implementation: implementation.to_string(),
                preference: Preference::of(implementation),
            })
            .collect(),
        capability,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.implementations.is_empty() {
        println!("no implementations of {}", listing.capability);
    }
    for entry in &listing.implementations {
        let marker = if entry.preference.is_preferred() { ' ' } else { '~' };
        println!("{marker} {}", entry.implementation);
    }
    Ok(())
}

//! bundlewaste - duplicate and wasted-byte analysis for mobile app bundles.
//!
//! Usage:
//!   bundlewaste duplicates PATH   Classify duplicates in an extracted bundle
//!   bundlewaste rules             List classification rules in order
//!   bundlewaste --help            Show help

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bundlewaste_analyze::{
    AnalysisReport, AnalyzerConfig, AssetCatalog, BundleAnalyzer, Classified, RuleRegistry,
};

#[derive(Parser)]
#[command(
    name = "bundlewaste",
    version,
    about = "Find removable duplicate files in mobile app bundles",
    long_about = "bundlewaste finds byte-identical files in an extracted .ipa/.apk tree \
                  and separates real waste from duplicates the platform requires."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect and classify duplicate files
    Duplicates {
        /// Root of the extracted artifact
        path: PathBuf,

        /// JSON file with parsed asset catalogs
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Artifact size used for severity (defaults to the walked size)
        #[arg(long)]
        total_size: Option<u64>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Also list duplicates the platform requires
        #[arg(long)]
        show_filtered: bool,

        /// Maximum number of duplicate sets to show
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,
    },

    /// List classification rules in evaluation order
    Rules {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Duplicates {
            path,
            assets,
            total_size,
            config,
            format,
            show_filtered,
            top,
        } => {
            run_duplicates(
                &path,
                assets.as_deref(),
                total_size,
                config.as_deref(),
                format,
                show_filtered,
                top,
            )?;
        }
        Command::Rules { config } => {
            run_rules(config.as_deref())?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AnalyzerConfig =
        toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))?;
    config.detect.validate()?;
    debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}

fn load_catalogs(path: Option<&Path>) -> Result<Vec<AssetCatalog>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read asset catalogs {}", path.display()))?;
    let catalogs: Vec<AssetCatalog> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid asset catalogs {}", path.display()))?;
    debug!(catalogs = catalogs.len(), "asset catalogs loaded");
    Ok(catalogs)
}

/// Run detection and classification.
fn run_duplicates(
    path: &Path,
    assets: Option<&Path>,
    total_size: Option<u64>,
    config: Option<&Path>,
    format: OutputFormat,
    show_filtered: bool,
    top_n: usize,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    if !path.is_dir() {
        bail!("{} is not a directory", path.display());
    }
    let config = load_config(config)?;
    let catalogs = load_catalogs(assets)?;

    eprintln!("Analyzing {}...", path.display());

    let report = BundleAnalyzer::with_config(config).analyze(&path, &catalogs, total_size);

    match format {
        OutputFormat::Text => print_report(&report, show_filtered, top_n),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, show_filtered: bool, top_n: usize) {
    let duplicates = &report.duplicates;

    println!();
    println!("{}", "─".repeat(70));
    println!(" Duplicate Report - {}", report.root.display());
    println!("{}", "─".repeat(70));
    println!();

    for warning in &report.warnings {
        println!(" warning: {warning}");
    }

    println!(
        " {} duplicate sets: {} actionable, {} required by the platform",
        duplicates.total_count,
        duplicates.actionable.len(),
        duplicates.filtered.len()
    );
    println!(
        " Recoverable: {} of {}",
        format_size(report.total_savings()),
        format_size(report.total_size)
    );
    println!();

    if report.optimizations.is_empty() {
        println!(" No actionable duplicates found.");
    } else {
        for (i, opt) in report.optimizations.iter().take(top_n).enumerate() {
            println!(
                " {}. [{}] {} - {} recoverable",
                i + 1,
                opt.severity,
                opt.title,
                format_size(opt.estimated_savings)
            );
            if !opt.reason.is_empty() {
                println!("    {}", opt.reason);
            }
            for path in &opt.affected_paths {
                println!("    {path}");
            }
            println!();
        }
        let remaining = report.optimizations.len().saturating_sub(top_n);
        if remaining > 0 {
            println!(" ... and {remaining} more");
            println!();
        }
    }

    if show_filtered && !duplicates.filtered.is_empty() {
        println!("{}", "─".repeat(70));
        println!(" Required duplicates ({})", format_size(duplicates.filtered_waste()));
        println!("{}", "─".repeat(70));
        println!();
        for classified in duplicates.filtered.iter().take(top_n) {
            print_filtered(classified);
        }
    }
}

fn print_filtered(classified: &Classified) {
    let set = &classified.set;
    println!(
        " {} ({} files, {} each) - {}",
        classified.result.rule_id,
        set.count,
        format_size(set.size),
        classified.result.reason
    );
    for path in &set.files {
        println!("    {path}");
    }
    println!();
}

/// List registered rules.
fn run_rules(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let registry = RuleRegistry::default_rules(&config.classifier);

    for (i, rule) in registry.rules().enumerate() {
        println!(" {:>2}. {:<32} {}", i + 1, rule.id(), rule.name());
    }

    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

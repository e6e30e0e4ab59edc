//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

/// Heisenberg -- dependency health assessment from SBOMs.
///
/// Use `heisenberg <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "heisenberg", version, about, long_about = None)]
pub struct Cli {
    /// Path to the heisenberg.toml configuration file.
    #[arg(short, long, default_value = "heisenberg.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the health of a single package version.
    Check(CheckArgs),

    /// Assess every package of a vendor SBOM (CycloneDX, SPDX or CSV).
    Vendor(VendorArgs),

    /// Assess the SBOMs of several repositories into one report.
    Bulk(BulkArgs),

    /// Find specific package names in tabular SBOMs.
    Analyze(AnalyzeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- check ----

/// Check one package version against every signal source.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Package ecosystem (npm, pypi, go; synonyms such as golang accepted).
    #[arg(short, long)]
    pub ecosystem: String,

    /// Package name.
    #[arg(short, long)]
    pub package: String,

    /// Package version.
    #[arg(short = 'v', long)]
    pub version: String,
}

// ---- vendor ----

/// Assess a single third-party SBOM.
#[derive(Args, Debug)]
pub struct VendorArgs {
    /// Path to the vendor SBOM file.
    #[arg(long)]
    pub sbom_file: PathBuf,

    /// Name written to the repo_name column (default: file stem).
    #[arg(long)]
    pub vendor_name: Option<String>,

    /// Report CSV path (default: [output] path).
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
}

// ---- bulk ----

/// Assess `<sbom_dir>/<repo>_sbom.csv` for each selected repository.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selection").required(true).args(["all", "repos"])))]
pub struct BulkArgs {
    /// Use every repository listed in the repos file.
    #[arg(short, long)]
    pub all: bool,

    /// Comma-separated repository list, e.g. repo1,repo2.
    #[arg(short, long)]
    pub repos: Option<String>,

    /// Repository list file, one name per line (default: [sbom] repos_file).
    #[arg(long)]
    pub repos_file: Option<PathBuf>,

    /// Directory holding the per-repository SBOMs (default: [sbom] sbom_dir).
    #[arg(long)]
    pub sbom_dir: Option<PathBuf>,

    /// Report CSV path (default: [output] path).
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
}

// ---- analyze ----

/// Search tabular SBOMs for the given package names.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["sbom", "repos", "all"])))]
#[command(group(ArgGroup::new("names").required(true).args(["pkg", "file"])))]
pub struct AnalyzeArgs {
    /// Tabular SBOM to scan.
    #[arg(long)]
    pub sbom: Option<PathBuf>,

    /// Comma-separated repository list, e.g. repo1,repo2.
    #[arg(short, long)]
    pub repos: Option<String>,

    /// Use every repository listed in the repos file.
    #[arg(short, long)]
    pub all: bool,

    /// Comma-separated package names, e.g. pkg1,pkg2.
    #[arg(long)]
    pub pkg: Option<String>,

    /// File of package names, one per line (`#` comments allowed).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Match package names case-sensitively.
    #[arg(long)]
    pub case_sensitive: bool,

    /// Repository list file (default: [sbom] repos_file).
    #[arg(long)]
    pub repos_file: Option<PathBuf>,

    /// Directory holding the per-repository SBOMs (default: [sbom] sbom_dir).
    #[arg(long)]
    pub sbom_dir: Option<PathBuf>,

    /// Match CSV path, `-` for stdout.
    #[arg(short = 'o', long = "out", default_value = "analyze_matches.csv")]
    pub out: String,
}

// ---- config ----

/// Manage heisenberg configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, check, sources, sbom, output).
        #[arg(long)]
        section: Option<String>,
    },
}

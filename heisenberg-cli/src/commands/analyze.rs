//! `heisenberg analyze` command handler
//!
//! Finds target package names in tabular SBOMs. The match table keeps every
//! original column; in repository mode a leading `repo_name` column is added.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use heisenberg_core::config::HeisenbergConfig;
use heisenberg_health::{dedupe_rows, write_table};
use heisenberg_sbom::{MatchTable, PackageMatcher};

use crate::cli::AnalyzeArgs;
use crate::commands::repos;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Output target meaning stdout.
const STDOUT: &str = "-";

/// Execute the `analyze` command.
pub async fn execute(
    args: AnalyzeArgs,
    config: &HeisenbergConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let targets = collect_targets(args.pkg.as_deref(), args.file.as_deref()).await?;
    let matcher = PackageMatcher::new(&targets, args.case_sensitive);
    if matcher.is_empty() {
        return Err(CliError::Command("no package names provided".to_owned()));
    }
    let max_file_size = config.sbom.max_file_size;

    let (table, scanned) = match &args.sbom {
        Some(sbom) => {
            let table = matcher.scan_file(sbom, max_file_size).await?;
            (deduped(table), vec![sbom.display().to_string()])
        }
        None => {
            let selected = repos::select(
                args.all,
                args.repos.as_deref(),
                args.repos_file.as_deref(),
                config,
            )
            .await?;
            let dir = repos::sbom_dir(args.sbom_dir.as_deref(), config);
            scan_repositories(&matcher, &dir, &selected, max_file_size).await
        }
    };

    write_matches(&args.out, table.clone()).await?;
    info!(
        output = %args.out,
        matches = table.rows.len(),
        sboms = scanned.len(),
        "analysis finished"
    );

    // stdout already carries the CSV
    if args.out == STDOUT {
        return Ok(());
    }

    let summary = AnalyzeSummary {
        output: args.out,
        targets: matcher.len(),
        scanned,
        matches: table.rows.len(),
        header: table.header,
        rows: table.rows,
    };
    writer.render(&summary)
}

/// Target names from `--pkg a,b` and/or `--file names.txt`.
async fn collect_targets(pkg: Option<&str>, file: Option<&Path>) -> Result<Vec<String>, CliError> {
    let mut targets = pkg.map(PackageMatcher::parse_list).unwrap_or_default();
    if let Some(path) = file {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CliError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        targets.extend(PackageMatcher::parse_lines(&content));
    }
    Ok(targets)
}

fn deduped(table: MatchTable) -> MatchTable {
    MatchTable {
        rows: dedupe_rows(table.rows),
        header: table.header,
    }
}

/// Scan each repository SBOM and merge the results under a `repo_name` column.
///
/// The header of the first scanned SBOM is used for the merged table.
async fn scan_repositories(
    matcher: &PackageMatcher,
    dir: &Path,
    selected: &[String],
    max_file_size: usize,
) -> (MatchTable, Vec<String>) {
    let mut merged = MatchTable::default();
    let mut scanned = Vec::new();

    for (repo, path) in repos::existing_sboms(dir, selected).await {
        info!(repo = %repo, path = %path.display(), "analyzing sbom");
        match matcher.scan_file(&path, max_file_size).await {
            Ok(table) => {
                let table = deduped(table).with_source_column("repo_name", &repo);
                if merged.header.is_empty() {
                    merged.header = table.header;
                }
                merged.rows.extend(table.rows);
                scanned.push(repo);
            }
            Err(e) => {
                warn!(repo = %repo, path = %path.display(), error = %e, "unusable sbom, skipping");
            }
        }
    }

    (merged, scanned)
}

/// Write the match table to a file or, for `-`, to stdout.
async fn write_matches(out: &str, table: MatchTable) -> Result<(), CliError> {
    if out == STDOUT {
        if !table.header.is_empty() {
            let stdout = std::io::stdout();
            let mut handle = write_table(&table.header, &table.rows, stdout.lock())?;
            handle.flush()?;
        }
        return Ok(());
    }

    let path = PathBuf::from(out);
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::create(&path).map_err(|e| {
            CliError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        if !table.header.is_empty() {
            write_table(&table.header, &table.rows, file)?;
        }
        Ok::<_, CliError>(())
    })
    .await
    .map_err(|e| CliError::Command(format!("match writer task failed: {e}")))?
}

/// Summary printed after an `analyze` run written to a file.
#[derive(Debug, Serialize)]
pub struct AnalyzeSummary {
    /// Match CSV path
    pub output: String,
    /// Number of distinct target names
    pub targets: usize,
    /// SBOMs that were scanned
    pub scanned: Vec<String>,
    pub matches: usize,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Render for AnalyzeSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Matches: {}", self.output.bold())?;
        writeln!(
            w,
            "Scanned {} SBOM(s) for {} package name(s)",
            self.scanned.len(),
            self.targets
        )?;
        writeln!(w)?;

        if self.rows.is_empty() {
            writeln!(w, "{}", "No matching packages found.".green())?;
            return Ok(());
        }

        writeln!(w, "{}", format!("{} matching row(s)", self.matches).red().bold())?;
        writeln!(w, "{}", self.header.join(" | "))?;
        writeln!(w, "{}", "-".repeat(80))?;
        for row in &self.rows {
            writeln!(w, "{}", row.join(" | "))?;
        }
        Ok(())
    }
}

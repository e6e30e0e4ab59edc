//! Batch execution shared by `vendor` and `bulk`
//!
//! Runs the task queue through the orchestrator and writes the CSV report.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use heisenberg_core::config::HeisenbergConfig;
use heisenberg_health::{
    BatchReport, BatchStats, HealthCheckOrchestrator, HealthChecker, OrchestratorConfig,
    ReportRow, ReportWriter, SourceConfig, TaskQueue,
};

use crate::error::CliError;
use crate::output::Render;

/// Report path: CLI flag first, then `[output] path`.
pub fn report_path(flag: Option<&Path>, config: &HeisenbergConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.path))
}

/// Check every queued task and write one report row per task.
pub async fn run_report(
    config: &HeisenbergConfig,
    sources: Vec<String>,
    queue: TaskQueue,
    out: &Path,
) -> Result<BatchSummary, CliError> {
    let checker = HealthChecker::from_sources(&SourceConfig::from_core(&config.sources))?;
    let orchestrator =
        HealthCheckOrchestrator::new(checker, OrchestratorConfig::from_core(&config.check))?;

    let skipped = queue.skipped();
    if queue.is_empty() {
        warn!(skipped, "no checkable packages queued");
    }

    let BatchReport { rows, stats } = orchestrator.run(queue.into_tasks()).await;
    let written = write_report(out.to_path_buf(), rows).await?;
    info!(path = %out.display(), rows = written, "report written");

    Ok(BatchSummary {
        output: out.display().to_string(),
        sources,
        skipped,
        stats,
    })
}

/// Write the report on the blocking pool.
async fn write_report(path: PathBuf, rows: Vec<ReportRow>) -> Result<usize, CliError> {
    tokio::task::spawn_blocking(move || {
        let mut writer = ReportWriter::create(&path)?;
        writer.write_rows(&rows)?;
        let written = writer.rows_written();
        writer.finish()?;
        Ok::<_, CliError>(written)
    })
    .await
    .map_err(|e| CliError::Command(format!("report writer task failed: {e}")))?
}

/// Summary printed after a `vendor` or `bulk` run.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    /// Report file path
    pub output: String,
    /// Source identifiers in report order
    pub sources: Vec<String>,
    /// Records skipped for an unsupported ecosystem
    pub skipped: usize,
    pub stats: BatchStats,
}

impl Render for BatchSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Report: {}", self.output.bold())?;
        writeln!(w, "Sources: {}", self.sources.join(", "))?;
        writeln!(
            w,
            "Packages: {} checked, {} skipped",
            self.stats.total, self.skipped
        )?;

        let failures = self.stats.timed_out + self.stats.failed;
        let outcome = format!(
            "{} completed, {} timed out, {} failed",
            self.stats.completed, self.stats.timed_out, self.stats.failed
        );
        if failures > 0 {
            writeln!(w, "Outcome: {}", outcome.yellow())?;
        } else {
            writeln!(w, "Outcome: {}", outcome.green())?;
        }
        writeln!(w, "Elapsed: {:.1}s", self.stats.elapsed_secs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(failed: usize) -> BatchSummary {
        BatchSummary {
            output: "repos_sbom_results.csv".to_owned(),
            sources: vec!["web-frontend".to_owned(), "api-server".to_owned()],
            skipped: 1,
            stats: BatchStats {
                total: 3,
                completed: 3 - failed,
                timed_out: 0,
                failed,
                elapsed_secs: 1.25,
            },
        }
    }

    #[test]
    fn test_batch_summary_render_text() {
        let mut buffer = Vec::new();
        summary(1)
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("repos_sbom_results.csv"));
        assert!(output.contains("web-frontend, api-server"));
        assert!(output.contains("3 checked, 1 skipped"));
        assert!(output.contains("1 failed"));
    }

    #[test]
    fn test_batch_summary_json() {
        let json = serde_json::to_value(summary(0)).expect("json serialization should succeed");
        assert_eq!(json["stats"]["completed"].as_u64(), Some(3));
        assert_eq!(json["sources"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_report_path_prefers_flag() {
        let config = HeisenbergConfig::default();
        assert_eq!(
            report_path(None, &config),
            PathBuf::from("repos_sbom_results.csv")
        );
        assert_eq!(
            report_path(Some(Path::new("vendor.csv")), &config),
            PathBuf::from("vendor.csv")
        );
    }

    #[tokio::test]
    async fn test_write_report_creates_header_only_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.csv");

        let written = write_report(path.clone(), Vec::new())
            .await
            .expect("report should be written");
        assert_eq!(written, 0);

        let content = std::fs::read_to_string(&path).expect("report exists");
        assert!(content.starts_with("repo_name,package,version"));
        assert_eq!(content.lines().count(), 1);
    }
}

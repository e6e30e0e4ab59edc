//! Integration tests for the CSV report file
//!
//! Orchestrator output is written through `ReportWriter::create` and read back
//! from disk.

use std::time::Duration;

use heisenberg_core::types::{Ecosystem, PackageRecord};
use heisenberg_health::{
    CrossReferenceLinks, HealthCheckOrchestrator, HealthCheckResult, OrchestratorConfigBuilder,
    PackageChecker, REPORT_HEADER, ReportWriter, TaskError, TaskQueue,
};

/// `broken`만 실패하고 나머지는 Not Found를 돌려주는 체커
struct NotFoundChecker;

impl PackageChecker for NotFoundChecker {
    async fn check(&self, record: &PackageRecord) -> Result<HealthCheckResult, TaskError> {
        if record.name() == "broken" {
            return Err(TaskError::Internal("registry exploded".to_owned()));
        }
        Ok(HealthCheckResult::not_found(CrossReferenceLinks::for_package(
            record.ecosystem(),
            record.name(),
            record.version(),
        )))
    }
}

fn record(name: &str) -> PackageRecord {
    PackageRecord::new(name, "1.0.0", Ecosystem::Npm, "MIT").unwrap()
}

#[tokio::test]
async fn report_file_has_one_row_per_task_in_order() {
    // Given: Three queued packages, the middle one failing
    let mut queue = TaskQueue::new();
    queue.extend(
        "web-frontend",
        vec![record("left-pad"), record("broken"), record("lodash")],
    );
    let config = OrchestratorConfigBuilder::new()
        .max_workers(3)
        .pause_every(0)
        .task_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let orchestrator = HealthCheckOrchestrator::new(NotFoundChecker, config).unwrap();
    let report = orchestrator.run(queue.into_tasks()).await;

    // When: Writing the report file
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repos_sbom_results.csv");
    let mut writer = ReportWriter::create(&path).unwrap();
    writer.write_rows(&report.rows).unwrap();
    assert_eq!(writer.rows_written(), 3);
    writer.finish().unwrap();

    // Then: Header plus one row per task, the failure confined to its own row
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4, "{content}");
    assert_eq!(lines[0], REPORT_HEADER.join(","));
    assert!(lines[1].starts_with("web-frontend,left-pad,1.0.0,npm,MIT,Not Found,"));
    assert!(lines[2].starts_with("web-frontend,broken,1.0.0,npm,MIT,Error: registry exploded,"));
    assert!(lines[3].starts_with("web-frontend,lodash,1.0.0,npm,MIT,Not Found,"));
    assert!(lines[2].ends_with("https://socket.dev/npm/package/broken"));
}

#[test]
fn create_overwrites_existing_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vendor.csv");
    std::fs::write(&path, "stale,content\nfrom,previous run\n").unwrap();

    let writer = ReportWriter::create(&path).unwrap();
    writer.finish().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, format!("{}\n", REPORT_HEADER.join(",")));
}

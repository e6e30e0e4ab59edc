//! `heisenberg check` command handler

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use heisenberg_core::config::HeisenbergConfig;
use heisenberg_core::types::PackageRecord;
use heisenberg_health::{
    CrossReferenceLinks, HealthCheckResult, HealthChecker, PackageChecker, SourceConfig,
};
use heisenberg_sbom::EcosystemAliases;

use crate::cli::CheckArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `check` command.
///
/// A failed or timed-out check is still rendered (with sentinel values)
/// before the error is returned.
pub async fn execute(
    args: CheckArgs,
    config: &HeisenbergConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let aliases = EcosystemAliases::from_map(&config.sbom.ecosystem_aliases);
    let ecosystem = aliases.normalize(&args.ecosystem);
    if !ecosystem.is_checkable() {
        return Err(CliError::Command(format!(
            "unsupported ecosystem: {} (expected: npm, pypi, go)",
            args.ecosystem
        )));
    }

    let record = PackageRecord::new(&args.package, &args.version, ecosystem, "").ok_or_else(
        || CliError::Command("package name and version must not be empty".to_owned()),
    )?;

    let checker = HealthChecker::from_sources(&SourceConfig::from_core(&config.sources))?;
    let links =
        CrossReferenceLinks::for_package(record.ecosystem(), record.name(), record.version());
    let timeout = Duration::from_secs(config.check.timeout_secs);

    info!(package = %record, "checking package");
    let (result, failure) = match tokio::time::timeout(timeout, checker.check(&record)).await {
        Ok(Ok(result)) => (result, None),
        Ok(Err(e)) => {
            warn!(package = %record, error = %e, "check failed");
            (HealthCheckResult::failed(e.to_string(), links), Some(e.to_string()))
        }
        Err(_) => {
            warn!(package = %record, timeout_secs = timeout.as_secs(), "check timed out");
            (
                HealthCheckResult::timed_out(links),
                Some(format!("check timed out after {}s", timeout.as_secs())),
            )
        }
    };

    writer.render(&CheckReport { record, result })?;

    match failure {
        Some(msg) => Err(CliError::Command(msg)),
        None => Ok(()),
    }
}

/// Single package health report.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    #[serde(flatten)]
    pub record: PackageRecord,
    #[serde(flatten)]
    pub result: HealthCheckResult,
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let r = &self.result;
        let title = format!("{}@{}", self.record.name(), self.record.version());
        writeln!(w, "{} ({})", title.bold(), self.record.ecosystem())?;
        writeln!(w)?;

        let rows = [
            ("Health score", r.health_score.render()),
            ("Custom health score", r.custom_health_score.render()),
            ("Description", r.description.render()),
            ("Stars", r.stars.render()),
            ("Forks", r.forks.render()),
            ("Maintenance", r.maintenance_score.render()),
            ("Dependents", r.dependents.render()),
            ("Security advisories", r.security_info()),
            ("Advisory IDs", r.security_advisories()),
            ("Security score", r.security_score.render()),
            ("Deprecated", r.deprecated.render()),
            ("Published at", r.published_at.render()),
            ("Published < 24h", r.freshness.render()),
        ];
        for (label, value) in rows {
            writeln!(w, "  {label:<22} {value}")?;
        }

        writeln!(w)?;
        writeln!(w, "  {:<22} {}", "deps.dev", r.links.deps_dev)?;
        writeln!(w, "  {:<22} {}", "Snyk", r.links.snyk)?;
        writeln!(w, "  {:<22} {}", "Socket", r.links.socket)?;
        Ok(())
    }
}

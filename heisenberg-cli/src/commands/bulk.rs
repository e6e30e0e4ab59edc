//! `heisenberg bulk` command handler

use tracing::{info, warn};

use heisenberg_core::config::HeisenbergConfig;
use heisenberg_health::TaskQueue;
use heisenberg_sbom::{NormalizerConfig, SbomNormalizer};

use crate::cli::BulkArgs;
use crate::commands::{batch, repos};
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the `bulk` command.
///
/// All selected repositories are checked as one batch so the worker pool is
/// shared across repositories. Repositories without a usable SBOM are skipped.
pub async fn execute(
    args: BulkArgs,
    config: &HeisenbergConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let selected = repos::select(
        args.all,
        args.repos.as_deref(),
        args.repos_file.as_deref(),
        config,
    )
    .await?;
    let dir = repos::sbom_dir(args.sbom_dir.as_deref(), config);
    info!(repos = selected.len(), sbom_dir = %dir.display(), "bulk run started");

    let normalizer = SbomNormalizer::new(NormalizerConfig::from_core(&config.sbom))?;
    let mut queue = TaskQueue::new();
    let mut sources = Vec::new();

    for (repo, path) in repos::existing_sboms(&dir, &selected).await {
        match normalizer.normalize_file(&path).await {
            Ok(document) => {
                let queued = queue.extend(&repo, document.records);
                info!(repo = %repo, queued, "repository packages queued");
                sources.push(repo);
            }
            Err(e) => {
                warn!(repo = %repo, path = %path.display(), error = %e, "unusable sbom, skipping");
            }
        }
    }

    let out = batch::report_path(args.out.as_deref(), config);
    let summary = batch::run_report(config, sources, queue, &out).await?;
    writer.render(&summary)
}

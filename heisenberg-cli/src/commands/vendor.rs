//! `heisenberg vendor` command handler

use std::path::Path;

use tracing::info;

use heisenberg_core::config::HeisenbergConfig;
use heisenberg_health::TaskQueue;
use heisenberg_sbom::{NormalizerConfig, SbomNormalizer};

use crate::cli::VendorArgs;
use crate::commands::batch;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the `vendor` command.
pub async fn execute(
    args: VendorArgs,
    config: &HeisenbergConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let vendor = args
        .vendor_name
        .clone()
        .unwrap_or_else(|| default_vendor_name(&args.sbom_file));
    info!(path = %args.sbom_file.display(), vendor = %vendor, "processing vendor sbom");

    let normalizer = SbomNormalizer::new(NormalizerConfig::from_core(&config.sbom))?;
    let document = normalizer.normalize_file(&args.sbom_file).await?;

    let mut queue = TaskQueue::new();
    let queued = queue.extend(&vendor, document.records);
    info!(vendor = %vendor, queued, skipped = queue.skipped(), "vendor packages queued");

    let out = batch::report_path(args.out.as_deref(), config);
    let summary = batch::run_report(config, vec![vendor], queue, &out).await?;
    writer.render(&summary)
}

/// File name without its last extension (`acme.cdx.json` → `acme.cdx`).
fn default_vendor_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vendor".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vendor_name_strips_last_extension() {
        assert_eq!(default_vendor_name(Path::new("/tmp/acme.cdx.json")), "acme.cdx");
        assert_eq!(default_vendor_name(Path::new("vendor_sbom.csv")), "vendor_sbom");
        assert_eq!(default_vendor_name(Path::new("bom")), "bom");
    }

    #[test]
    fn test_default_vendor_name_without_file_name() {
        assert_eq!(default_vendor_name(Path::new("/")), "vendor");
    }
}

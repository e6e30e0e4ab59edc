//! Repository selection shared by `bulk` and `analyze`
//!
//! Repositories come from `--repos a,b` or, with `--all`, from the repos file.
//! Each repository maps to `<sbom_dir>/<repo>_sbom.csv`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use heisenberg_core::config::HeisenbergConfig;
use heisenberg_sbom::PackageMatcher;

use crate::error::CliError;

/// Resolve the selected repository names.
///
/// # Errors
///
/// `CliError::Io` when the repos file cannot be read, `CliError::Command` when
/// the selection is empty.
pub async fn select(
    all: bool,
    repos: Option<&str>,
    repos_file: Option<&Path>,
    config: &HeisenbergConfig,
) -> Result<Vec<String>, CliError> {
    let selected = if all {
        let path = repos_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&config.sbom.repos_file));
        debug!(path = %path.display(), "reading repository list");
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            CliError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        PackageMatcher::parse_lines(&content)
    } else {
        PackageMatcher::parse_list(repos.unwrap_or_default())
    };

    if selected.is_empty() {
        return Err(CliError::Command("no repositories selected".to_owned()));
    }
    Ok(selected)
}

/// SBOM directory: CLI flag first, then `[sbom] sbom_dir`.
pub fn sbom_dir(flag: Option<&Path>, config: &HeisenbergConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.sbom.sbom_dir))
}

/// `(repo, path)` pairs for repositories whose SBOM exists.
///
/// Missing files are skipped with a warning.
pub async fn existing_sboms(dir: &Path, repos: &[String]) -> Vec<(String, PathBuf)> {
    let mut found = Vec::with_capacity(repos.len());
    for repo in repos {
        let path = dir.join(format!("{repo}_sbom.csv"));
        match tokio::fs::try_exists(&path).await {
            Ok(true) => found.push((repo.clone(), path)),
            _ => warn!(
                repo = %repo,
                path = %path.display(),
                "sbom not found for repository, skipping"
            ),
        }
    }
    found
}

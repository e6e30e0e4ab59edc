//! CLI-specific error types and exit code mapping

use heisenberg_core::error::HeisenbergError;
use heisenberg_health::HealthCheckError;
use heisenberg_sbom::SbomParseError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from heisenberg-core.
    #[error("{0}")]
    Core(#[from] HeisenbergError),

    /// SBOM normalization or matching failure.
    #[error("sbom error: {0}")]
    Sbom(String),

    /// Health check setup or report failure.
    #[error("check error: {0}")]
    Check(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(HeisenbergError::Config(_)) => 2,
            Self::Io(_) | Self::Core(HeisenbergError::Io(_)) => 10,
            Self::JsonSerialize(_)
            | Self::Command(_)
            | Self::Core(_)
            | Self::Sbom(_)
            | Self::Check(_) => 1,
        }
    }
}

impl From<SbomParseError> for CliError {
    fn from(e: SbomParseError) -> Self {
        match e {
            SbomParseError::Io { path, source } => {
                Self::Io(std::io::Error::new(source.kind(), format!("{path}: {source}")))
            }
            SbomParseError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Sbom(other.to_string()),
        }
    }
}

impl From<HealthCheckError> for CliError {
    fn from(e: HealthCheckError) -> Self {
        match e {
            HealthCheckError::Io { path, source } => {
                Self::Io(std::io::Error::new(source.kind(), format!("{path}: {source}")))
            }
            HealthCheckError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Check(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heisenberg_core::error::{ConfigError, SbomError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err: CliError = HeisenbergError::Config(ConfigError::FileNotFound {
            path: "heisenberg.toml".to_owned(),
        })
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_other_errors() {
        assert_eq!(CliError::Command("x".to_owned()).exit_code(), 1);
        assert_eq!(CliError::Sbom("x".to_owned()).exit_code(), 1);
        assert_eq!(CliError::Check("x".to_owned()).exit_code(), 1);
        let core = CliError::Core(HeisenbergError::Sbom(SbomError::ParseFailed("x".to_owned())));
        assert_eq!(core.exit_code(), 1);
    }

    #[test]
    fn test_from_sbom_io_error_keeps_path() {
        let err: CliError = SbomParseError::Io {
            path: "vendor.cdx.json".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
        .into();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("vendor.cdx.json"));
    }

    #[test]
    fn test_from_sbom_parse_error() {
        let err: CliError = SbomParseError::FormatDetection {
            path: "notes.txt".to_owned(),
        }
        .into();
        assert!(matches!(err, CliError::Sbom(_)));
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_from_health_config_error() {
        let err: CliError = HealthCheckError::Config {
            field: "max_workers".to_owned(),
            reason: "must be between 1 and 256".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_error_display_command() {
        let err = CliError::Command("execution failed".to_owned());
        assert_eq!(err.to_string(), "execution failed");
    }
}

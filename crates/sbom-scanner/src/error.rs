//! SBOM 정규화 에러 타입
//!
//! [`SbomParseError`]는 SBOM 정규화 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<SbomParseError> for HeisenbergError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **형식 판별**: `FormatDetection`
//! - **문서 파싱**: `Parse`, `MissingColumn`
//! - **설정**: `Config`
//! - **작업 실행**: `Task`
//! - **파일 I/O**: `Io`, `FileTooBig`

use heisenberg_core::error::{ConfigError, HeisenbergError, SbomError};

/// SBOM 정규화 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum SbomParseError {
    /// 확장자/루트 요소로 형식을 판별할 수 없음
    #[error("unable to detect sbom format for {path}")]
    FormatDetection {
        /// 대상 문서 경로
        path: String,
    },

    /// 문서 파싱 실패 (잘못된 JSON/XML/CSV)
    #[error("sbom parse error: {path}: {reason}")]
    Parse {
        /// 대상 문서 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 필수 열 누락 (표 형식)
    #[error("missing required column '{column}' in {path}")]
    MissingColumn {
        /// 대상 문서 경로
        path: String,
        /// 누락된 열 이름
        column: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 블로킹 작업 실행 실패
    #[error("task error: {0}")]
    Task(String),

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too big: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 크기
        size: usize,
        /// 최대 허용 크기
        max: usize,
    },
}

impl From<SbomParseError> for HeisenbergError {
    fn from(err: SbomParseError) -> Self {
        match err {
            SbomParseError::FormatDetection { path } => {
                HeisenbergError::Sbom(SbomError::FormatDetection(path))
            }
            SbomParseError::Parse { .. } | SbomParseError::MissingColumn { .. } => {
                HeisenbergError::Sbom(SbomError::ParseFailed(err.to_string()))
            }
            SbomParseError::Config { field, reason } => {
                HeisenbergError::Config(ConfigError::InvalidValue { field, reason })
            }
            SbomParseError::Task(msg) => HeisenbergError::Sbom(SbomError::ParseFailed(msg)),
            SbomParseError::Io { source, .. } => HeisenbergError::Io(source),
            SbomParseError::FileTooBig { size, max, .. } => {
                HeisenbergError::Sbom(SbomError::TooLarge { size, max })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection_error_display() {
        let err = SbomParseError::FormatDetection {
            path: "vendor/bom.txt".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unable to detect sbom format for vendor/bom.txt"
        );
    }

    #[test]
    fn parse_error_display() {
        let err = SbomParseError::Parse {
            path: "bom.json".to_owned(),
            reason: "expected value at line 1".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bom.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn file_too_big_error_display() {
        let err = SbomParseError::FileTooBig {
            path: "bom.json".to_owned(),
            size: 20_000_000,
            max: 10_000_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains("10000000"));
    }

    #[test]
    fn converts_format_detection() {
        let err = SbomParseError::FormatDetection {
            path: "x.txt".to_owned(),
        };
        let top: HeisenbergError = err.into();
        assert!(matches!(
            top,
            HeisenbergError::Sbom(SbomError::FormatDetection(_))
        ));
    }

    #[test]
    fn converts_missing_column_to_parse_failed() {
        let err = SbomParseError::MissingColumn {
            path: "repo_sbom.csv".to_owned(),
            column: "package".to_owned(),
        };
        let top: HeisenbergError = err.into();
        assert!(matches!(
            top,
            HeisenbergError::Sbom(SbomError::ParseFailed(_))
        ));
    }

    #[test]
    fn converts_config_error() {
        let err = SbomParseError::Config {
            field: "max_file_size".to_owned(),
            reason: "must be greater than 0".to_owned(),
        };
        let top: HeisenbergError = err.into();
        assert!(matches!(
            top,
            HeisenbergError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn converts_io_error() {
        let err = SbomParseError::Io {
            path: "/tmp/missing".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let top: HeisenbergError = err.into();
        assert!(matches!(top, HeisenbergError::Io(_)));
    }
}

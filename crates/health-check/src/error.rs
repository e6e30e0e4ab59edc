//! 헬스 체크 에러 타입
//!
//! - [`HealthCheckError`]: 체커 구성, 리포트 출력 등 실행 단위 에러.
//!   `From<HealthCheckError> for HeisenbergError`로 상위 에러에 전파됩니다.
//! - [`TaskError`]: 패키지 하나의 체크 실패. 배치를 중단하지 않고
//!   해당 행의 `Error: <message>` 값으로 변환됩니다.

use heisenberg_core::error::{CheckError, ConfigError, HeisenbergError};

/// 헬스 체크 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum HealthCheckError {
    /// 지원하지 않는 에코시스템
    #[error("unsupported ecosystem: {ecosystem}")]
    UnsupportedEcosystem {
        /// 에코시스템 이름
        ecosystem: String,
    },

    /// HTTP 클라이언트 구성 실패
    #[error("http client error: {0}")]
    Http(String),

    /// 리포트 출력 실패
    #[error("report error: {0}")]
    Report(String),

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<csv::Error> for HealthCheckError {
    fn from(err: csv::Error) -> Self {
        HealthCheckError::Report(err.to_string())
    }
}

impl From<HealthCheckError> for HeisenbergError {
    fn from(err: HealthCheckError) -> Self {
        match err {
            HealthCheckError::UnsupportedEcosystem { ecosystem } => {
                HeisenbergError::Check(CheckError::UnsupportedEcosystem(ecosystem))
            }
            HealthCheckError::Http(msg) => HeisenbergError::Check(CheckError::Upstream(msg)),
            HealthCheckError::Report(msg) => HeisenbergError::Check(CheckError::Report(msg)),
            HealthCheckError::Io { source, .. } => HeisenbergError::Io(source),
            HealthCheckError::Config { field, reason } => {
                HeisenbergError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

/// 패키지 하나에 대한 체크 실패
///
/// 시그널 결과에 그대로 실려 다니므로 `Clone`입니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// 요청 전송 실패 (연결, 타임아웃)
    #[error("{origin} request failed: {reason}")]
    Transport {
        /// 시그널 소스 이름
        origin: &'static str,
        /// 실패 사유
        reason: String,
    },

    /// 응답 본문 해석 실패
    #[error("{origin} returned an unreadable response: {reason}")]
    Decode {
        /// 시그널 소스 이름
        origin: &'static str,
        /// 실패 사유
        reason: String,
    },

    /// 체커가 처리할 수 없는 에코시스템
    #[error("unsupported ecosystem: {0}")]
    UnsupportedEcosystem(String),

    /// 내부 에러 (태스크 패닉 등)
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_ecosystem_converts_to_check_error() {
        let err: HeisenbergError = HealthCheckError::UnsupportedEcosystem {
            ecosystem: "cargo".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            HeisenbergError::Check(CheckError::UnsupportedEcosystem(ref e)) if e == "cargo"
        ));
    }

    #[test]
    fn config_converts_to_invalid_value() {
        let err: HeisenbergError = HealthCheckError::Config {
            field: "max_workers".to_owned(),
            reason: "must be greater than 0".to_owned(),
        }
        .into();
        assert!(err.to_string().contains("max_workers"));
    }

    #[test]
    fn io_keeps_source_error() {
        let err: HeisenbergError = HealthCheckError::Io {
            path: "out.csv".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(matches!(err, HeisenbergError::Io(_)));
    }

    #[test]
    fn task_error_display_names_origin() {
        let err = TaskError::Transport {
            origin: "deps.dev",
            reason: "connection refused".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "deps.dev request failed: connection refused"
        );
    }
}

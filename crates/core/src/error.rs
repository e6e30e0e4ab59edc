//! 에러 타입 -- 도메인별 에러 정의

/// Heisenberg 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum HeisenbergError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// SBOM 처리 에러
    #[error("sbom error: {0}")]
    Sbom(#[from] SbomError),

    /// 헬스 체크 에러
    #[error("health check error: {0}")]
    Check(#[from] CheckError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// SBOM 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum SbomError {
    /// 문서 형식을 판별할 수 없음
    #[error("unable to detect sbom format: {0}")]
    FormatDetection(String),

    /// 문서 파싱 실패
    #[error("sbom parse failed: {0}")]
    ParseFailed(String),

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },
}

/// 헬스 체크 에러
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// 지원하지 않는 에코시스템
    #[error("unsupported ecosystem: {0}")]
    UnsupportedEcosystem(String),

    /// 외부 서비스 통신 실패
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// 리포트 출력 실패
    #[error("report write failed: {0}")]
    Report(String),
}

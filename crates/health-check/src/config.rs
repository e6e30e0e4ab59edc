//! 헬스 체크 설정
//!
//! - [`OrchestratorConfig`]: core의 [`CheckConfig`]에서 파생되는 동시성/페이싱/타임아웃 설정
//! - [`SourceConfig`]: core의 [`SourcesConfig`]에서 파생되는 외부 시그널 소스 설정
//!
//! # 사용 예시
//!
//! ```
//! use std::time::Duration;
//! use heisenberg_health::OrchestratorConfigBuilder;
//!
//! let config = OrchestratorConfigBuilder::new()
//!     .max_workers(8)
//!     .pause_every(0)
//!     .task_timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_workers, 8);
//! ```

use std::fmt;
use std::time::Duration;

use heisenberg_core::config::{CheckConfig, SourcesConfig};

use crate::error::HealthCheckError;

/// 동시 실행 상한
const MAX_WORKERS_LIMIT: usize = 256;

/// 오케스트레이터 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// 동시에 실행할 최대 체크 수
    pub max_workers: usize,
    /// N개 제출마다 휴지 (0이면 비활성화)
    pub pause_every: usize,
    /// 휴지 시간
    pub pause: Duration,
    /// 태스크당 타임아웃
    pub task_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::from_core(&CheckConfig::default())
    }
}

impl OrchestratorConfig {
    /// core의 `CheckConfig`에서 설정을 생성합니다.
    pub fn from_core(core: &CheckConfig) -> Self {
        Self {
            max_workers: core.max_workers,
            pause_every: core.pause_every,
            pause: Duration::from_millis(core.pause_millis),
            task_timeout: Duration::from_secs(core.timeout_secs),
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_workers`: 1-256
    /// - `task_timeout`: 0보다 커야 함
    pub fn validate(&self) -> Result<(), HealthCheckError> {
        if self.max_workers == 0 || self.max_workers > MAX_WORKERS_LIMIT {
            return Err(HealthCheckError::Config {
                field: "max_workers".to_owned(),
                reason: format!("must be 1-{MAX_WORKERS_LIMIT}"),
            });
        }
        if self.task_timeout.is_zero() {
            return Err(HealthCheckError::Config {
                field: "task_timeout".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }
        Ok(())
    }
}

/// [`OrchestratorConfig`] 빌더
#[derive(Default)]
pub struct OrchestratorConfigBuilder {
    config: OrchestratorConfig,
}

impl OrchestratorConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_workers(mut self, workers: usize) -> Self {
        self.config.max_workers = workers;
        self
    }

    pub fn pause_every(mut self, every: usize) -> Self {
        self.config.pause_every = every;
        self
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.config.pause = pause;
        self
    }

    pub fn task_timeout(mut self, timeout: Duration) -> Self {
        self.config.task_timeout = timeout;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `HealthCheckError::Config` 반환
    pub fn build(self) -> Result<OrchestratorConfig, HealthCheckError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// 외부 시그널 소스 설정
///
/// 베이스 URL은 끝의 `/`를 제거한 형태로 저장됩니다.
#[derive(Clone)]
pub struct SourceConfig {
    /// deps.dev API 베이스 URL (`/v3`, `/v3alpha` 앞부분)
    pub deps_dev_url: String,
    /// npm 레지스트리 베이스 URL
    pub npm_registry_url: String,
    /// PyPI 베이스 URL
    pub pypi_url: String,
    /// GitHub API 베이스 URL
    pub github_api_url: String,
    /// GitHub API 토큰
    pub github_token: Option<String>,
    /// HTTP 요청 타임아웃
    pub request_timeout: Duration,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::from_core(&SourcesConfig::default())
    }
}

// 토큰은 로그에 남기지 않음
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("deps_dev_url", &self.deps_dev_url)
            .field("npm_registry_url", &self.npm_registry_url)
            .field("pypi_url", &self.pypi_url)
            .field("github_api_url", &self.github_api_url)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SourceConfig {
    /// core의 `SourcesConfig`에서 설정을 생성합니다.
    ///
    /// 빈 토큰은 `None`으로 취급합니다.
    pub fn from_core(core: &SourcesConfig) -> Self {
        let token = core.github_token.trim();
        Self {
            deps_dev_url: trim_base(&core.deps_dev_url),
            npm_registry_url: trim_base(&core.npm_registry_url),
            pypi_url: trim_base(&core.pypi_url),
            github_api_url: trim_base(&core.github_api_url),
            github_token: (!token.is_empty()).then(|| token.to_owned()),
            request_timeout: Duration::from_secs(core.request_timeout_secs),
            user_agent: core.user_agent.clone(),
        }
    }

    /// 모든 소스를 하나의 베이스 URL로 돌립니다 (로컬 테스트 서버용).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = trim_base(base);
        self.deps_dev_url = base.clone();
        self.npm_registry_url = base.clone();
        self.pypi_url = base.clone();
        self.github_api_url = base;
        self
    }

    /// 설정 값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), HealthCheckError> {
        for (field, url) in [
            ("deps_dev_url", &self.deps_dev_url),
            ("npm_registry_url", &self.npm_registry_url),
            ("pypi_url", &self.pypi_url),
            ("github_api_url", &self.github_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(HealthCheckError::Config {
                    field: field.to_owned(),
                    reason: format!("must be an http(s) URL, got '{url}'"),
                });
            }
        }
        if self.request_timeout.is_zero() {
            return Err(HealthCheckError::Config {
                field: "request_timeout".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }
        Ok(())
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

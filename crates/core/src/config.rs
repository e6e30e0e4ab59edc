//! 설정 관리 -- heisenberg.toml 파싱 및 런타임 설정
//!
//! [`HeisenbergConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//! 실행 시작 시 한 번 로드되어 각 구성 요소에 명시적으로 전달됩니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`HEISENBERG_CHECK_MAX_WORKERS=8` 형식, `GITHUB_TOKEN`)
//! 3. 설정 파일 (`heisenberg.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), heisenberg_core::error::HeisenbergError> {
//! use heisenberg_core::config::HeisenbergConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = HeisenbergConfig::load("heisenberg.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = HeisenbergConfig::parse("[check]\nmax_workers = 8")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, HeisenbergError};

/// 워커 수 상한
const MAX_WORKERS_LIMIT: usize = 256;

/// 페이싱 휴지 시간 상한 (밀리초)
const MAX_PAUSE_MILLIS: u64 = 60_000;

/// Heisenberg 통합 설정
///
/// `heisenberg.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeisenbergConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 헬스 체크 오케스트레이터 설정
    #[serde(default)]
    pub check: CheckConfig,
    /// 외부 시그널 소스 설정
    #[serde(default)]
    pub sources: SourcesConfig,
    /// SBOM 정규화 설정
    #[serde(default)]
    pub sbom: SbomConfig,
    /// 리포트 출력 설정
    #[serde(default)]
    pub output: OutputConfig,
}

impl HeisenbergConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, HeisenbergError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 시작합니다.
    ///
    /// 파일이 존재하지만 읽거나 파싱할 수 없으면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, HeisenbergError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(HeisenbergError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, HeisenbergError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HeisenbergError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                HeisenbergError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, HeisenbergError> {
        toml::from_str(toml_str).map_err(|e| {
            HeisenbergError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `HEISENBERG_{SECTION}_{FIELD}`
    /// 예: `HEISENBERG_CHECK_TIMEOUT_SECS=60`
    ///
    /// `GITHUB_TOKEN`은 `HEISENBERG_SOURCES_GITHUB_TOKEN`보다 먼저 적용됩니다.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "HEISENBERG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "HEISENBERG_GENERAL_LOG_FORMAT");

        // Check
        override_u64(&mut self.check.timeout_secs, "HEISENBERG_CHECK_TIMEOUT_SECS");
        override_usize(&mut self.check.max_workers, "HEISENBERG_CHECK_MAX_WORKERS");
        override_usize(&mut self.check.pause_every, "HEISENBERG_CHECK_PAUSE_EVERY");
        override_u64(&mut self.check.pause_millis, "HEISENBERG_CHECK_PAUSE_MILLIS");

        // Sources
        override_string(
            &mut self.sources.deps_dev_url,
            "HEISENBERG_SOURCES_DEPS_DEV_URL",
        );
        override_string(
            &mut self.sources.npm_registry_url,
            "HEISENBERG_SOURCES_NPM_REGISTRY_URL",
        );
        override_string(&mut self.sources.pypi_url, "HEISENBERG_SOURCES_PYPI_URL");
        override_string(
            &mut self.sources.github_api_url,
            "HEISENBERG_SOURCES_GITHUB_API_URL",
        );
        override_string(&mut self.sources.github_token, "GITHUB_TOKEN");
        override_string(
            &mut self.sources.github_token,
            "HEISENBERG_SOURCES_GITHUB_TOKEN",
        );
        override_u64(
            &mut self.sources.request_timeout_secs,
            "HEISENBERG_SOURCES_REQUEST_TIMEOUT_SECS",
        );
        override_string(&mut self.sources.user_agent, "HEISENBERG_SOURCES_USER_AGENT");

        // SBOM
        override_usize(&mut self.sbom.max_file_size, "HEISENBERG_SBOM_MAX_FILE_SIZE");
        override_map(
            &mut self.sbom.ecosystem_aliases,
            "HEISENBERG_SBOM_ECOSYSTEM_ALIASES",
        );
        override_string(&mut self.sbom.sbom_dir, "HEISENBERG_SBOM_SBOM_DIR");
        override_string(&mut self.sbom.repos_file, "HEISENBERG_SBOM_REPOS_FILE");

        // Output
        override_string(&mut self.output.path, "HEISENBERG_OUTPUT_PATH");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), HeisenbergError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        // check 섹션
        if self.check.max_workers == 0 || self.check.max_workers > MAX_WORKERS_LIMIT {
            return Err(invalid(
                "check.max_workers",
                format!("must be between 1 and {MAX_WORKERS_LIMIT}"),
            ));
        }
        if self.check.timeout_secs == 0 {
            return Err(invalid("check.timeout_secs", "must be greater than 0"));
        }
        if self.check.pause_millis > MAX_PAUSE_MILLIS {
            return Err(invalid(
                "check.pause_millis",
                format!("must not exceed {MAX_PAUSE_MILLIS}"),
            ));
        }

        // sources 섹션
        for (field, url) in [
            ("sources.deps_dev_url", &self.sources.deps_dev_url),
            ("sources.npm_registry_url", &self.sources.npm_registry_url),
            ("sources.pypi_url", &self.sources.pypi_url),
            ("sources.github_api_url", &self.sources.github_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(field, "must be an http(s) URL"));
            }
        }
        if self.sources.request_timeout_secs == 0 {
            return Err(invalid(
                "sources.request_timeout_secs",
                "must be greater than 0",
            ));
        }

        // sbom 섹션
        if self.sbom.max_file_size == 0 {
            return Err(invalid("sbom.max_file_size", "must be greater than 0"));
        }
        for (alias, canonical) in &self.sbom.ecosystem_aliases {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err(invalid(
                    "sbom.ecosystem_aliases",
                    "alias and canonical name must not be empty",
                ));
            }
        }

        if self.output.path.trim().is_empty() {
            return Err(invalid("output.path", "must not be empty"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> HeisenbergError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.into(),
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 헬스 체크 오케스트레이터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// 태스크당 타임아웃 (초)
    pub timeout_secs: u64,
    /// 동시에 실행할 최대 체크 수
    pub max_workers: usize,
    /// N개 제출마다 휴지 (0이면 비활성화)
    pub pause_every: usize,
    /// 휴지 시간 (밀리초)
    pub pause_millis: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_workers: 4,
            pause_every: 20,
            pause_millis: 500,
        }
    }
}

/// 외부 시그널 소스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// deps.dev API 베이스 URL
    pub deps_dev_url: String,
    /// npm 레지스트리 베이스 URL
    pub npm_registry_url: String,
    /// PyPI 베이스 URL
    pub pypi_url: String,
    /// GitHub API 베이스 URL
    pub github_api_url: String,
    /// GitHub API 토큰 (직렬화하지 않음)
    #[serde(skip_serializing)]
    pub github_token: String,
    /// HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            deps_dev_url: "https://api.deps.dev".to_owned(),
            npm_registry_url: "https://registry.npmjs.org".to_owned(),
            pypi_url: "https://pypi.org".to_owned(),
            github_api_url: "https://api.github.com".to_owned(),
            github_token: String::new(),
            request_timeout_secs: 10,
            user_agent: concat!("heisenberg/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// SBOM 정규화 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SbomConfig {
    /// 읽을 수 있는 최대 문서 크기 (바이트)
    pub max_file_size: usize,
    /// 에코시스템 동의어 테이블 (별칭 → 정규형)
    ///
    /// 정규화 시 기본 별칭(`golang` → `go`)에 더해집니다.
    pub ecosystem_aliases: BTreeMap<String, String>,
    /// 저장소별 `<repo>_sbom.csv` 파일이 있는 디렉토리
    pub sbom_dir: String,
    /// 저장소 목록 파일 (한 줄에 하나)
    pub repos_file: String,
}

impl Default for SbomConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50MB
            ecosystem_aliases: BTreeMap::from([("golang".to_owned(), "go".to_owned())]),
            sbom_dir: "sbom".to_owned(),
            repos_file: "repos.txt".to_owned(),
        }
    }
}

/// 리포트 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 기본 CSV 리포트 경로
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "repos_sbom_results.csv".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

/// `alias=canonical,alias=canonical` 형식의 항목을 기존 테이블에 병합합니다.
fn override_map(target: &mut BTreeMap<String, String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        for pair in val.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((alias, canonical)) => {
                    target.insert(
                        alias.trim().to_lowercase(),
                        canonical.trim().to_lowercase(),
                    );
                }
                None => warn!(
                    env_key,
                    value = pair,
                    "failed to parse alias pair from env var, ignoring"
                ),
            }
        }
    }
}

//! SBOM 정규화 설정
//!
//! [`NormalizerConfig`]는 core의 [`SbomConfig`](heisenberg_core::config::SbomConfig)에서
//! 정규화에 필요한 필드(파일 크기 제한, 에코시스템 동의어)만 가져옵니다.
//!
//! # 사용 예시
//!
//! ```
//! use heisenberg_sbom::{NormalizerConfig, NormalizerConfigBuilder};
//!
//! // 기본값으로 생성
//! let config = NormalizerConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = NormalizerConfigBuilder::new()
//!     .max_file_size(1024 * 1024)
//!     .alias("pip", "pypi")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.ecosystem_aliases["pip"], "pypi");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SbomParseError;

/// 설정 상한값 상수
const MAX_FILE_SIZE: usize = 512 * 1024 * 1024; // 512 MB

/// SBOM 정규화 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// 문서 최대 허용 크기 (바이트)
    pub max_file_size: usize,
    /// 에코시스템 동의어 (별칭 → 정규형)
    pub ecosystem_aliases: BTreeMap<String, String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let core = heisenberg_core::config::SbomConfig::default();
        Self {
            max_file_size: core.max_file_size,
            ecosystem_aliases: core.ecosystem_aliases,
        }
    }
}

impl NormalizerConfig {
    /// core의 `SbomConfig`에서 정규화 설정을 생성합니다.
    pub fn from_core(core: &heisenberg_core::config::SbomConfig) -> Self {
        Self {
            max_file_size: core.max_file_size,
            ecosystem_aliases: core.ecosystem_aliases.clone(),
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_file_size`: 1-536870912 (512MB)
    /// - `ecosystem_aliases`: 빈 별칭/정규형 금지
    pub fn validate(&self) -> Result<(), SbomParseError> {
        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(SbomParseError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            });
        }

        for (alias, canonical) in &self.ecosystem_aliases {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err(SbomParseError::Config {
                    field: "ecosystem_aliases".to_owned(),
                    reason: "alias and canonical name must not be empty".to_owned(),
                });
            }
        }

        Ok(())
    }
}

/// [`NormalizerConfig`] 빌더
#[derive(Default)]
pub struct NormalizerConfigBuilder {
    config: NormalizerConfig,
}

impl NormalizerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 동의어를 하나 추가합니다.
    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.config
            .ecosystem_aliases
            .insert(alias.into(), canonical.into());
        self
    }

    /// 동의어 테이블 전체를 교체합니다.
    pub fn ecosystem_aliases(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.config.ecosystem_aliases = aliases;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `SbomParseError::Config` 반환
    pub fn build(self) -> Result<NormalizerConfig, SbomParseError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

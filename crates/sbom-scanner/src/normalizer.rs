//! SBOM 정규화기
//!
//! [`SbomNormalizer`]는 문서 하나를 읽어 형식을 판별하고,
//! 형식별 파서의 결과를 [`PackageRecord`] 목록으로 변환합니다.
//!
//! # 처리 흐름
//!
//! ```text
//! path --> read (size check) --> SbomDialect::detect --> SbomParser::extract
//!                                                              |
//!                                          EcosystemAliases + PackageRecord::new
//!                                                              |
//!                                                    NormalizedDocument
//! ```

use std::path::Path;

use metrics::counter;
use serde::Serialize;
use tracing::{debug, info};

use heisenberg_core::metrics as m;
use heisenberg_core::types::PackageRecord;

use crate::config::NormalizerConfig;
use crate::dialect::SbomDialect;
use crate::ecosystem::EcosystemAliases;
use crate::error::SbomParseError;
use crate::parser::RawComponent;

/// 정규화된 SBOM 문서
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedDocument {
    /// 원본 경로
    pub source: String,
    /// 판별된 형식
    pub dialect: SbomDialect,
    /// 문서 순서대로 정렬된 패키지 레코드
    pub records: Vec<PackageRecord>,
    /// 이름/버전 누락으로 버려진 컴포넌트 수
    pub dropped: usize,
}

/// SBOM 정규화기
#[derive(Debug, Clone)]
pub struct SbomNormalizer {
    config: NormalizerConfig,
    aliases: EcosystemAliases,
}

impl SbomNormalizer {
    /// 검증된 설정으로 정규화기를 생성합니다.
    pub fn new(config: NormalizerConfig) -> Result<Self, SbomParseError> {
        config.validate()?;
        let aliases = EcosystemAliases::from_map(&config.ecosystem_aliases);
        Ok(Self { config, aliases })
    }

    /// 사용 중인 동의어 테이블
    pub fn aliases(&self) -> &EcosystemAliases {
        &self.aliases
    }

    /// 파일을 읽어 정규화합니다.
    ///
    /// 파일 읽기와 파싱은 `spawn_blocking`에서 수행됩니다.
    pub async fn normalize_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<NormalizedDocument, SbomParseError> {
        let path = path.as_ref().to_path_buf();
        let normalizer = self.clone();
        tokio::task::spawn_blocking(move || {
            let content = read_bounded(&path, normalizer.config.max_file_size)?;
            normalizer.normalize_str(&path, &content)
        })
        .await
        .map_err(|e| SbomParseError::Task(format!("spawn_blocking failed: {e}")))?
    }

    /// 이미 읽은 문서 내용을 정규화합니다.
    ///
    /// `path`는 형식 판별(확장자)과 에러 메시지에 사용됩니다.
    pub fn normalize_str(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<NormalizedDocument, SbomParseError> {
        let source = path.display().to_string();
        let dialect = SbomDialect::detect(path, content)?;
        debug!(path = %source, dialect = %dialect, "sbom format detected");

        let raw = dialect.parser().extract(content, &source)?;
        let total = raw.len();
        let records = self.finalize(raw);
        let dropped = total - records.len();

        counter!(m::SBOM_DOCUMENTS_PARSED_TOTAL, m::LABEL_DIALECT => dialect.as_str())
            .increment(1);
        counter!(m::SBOM_RECORDS_EMITTED_TOTAL).increment(records.len() as u64);
        counter!(m::SBOM_COMPONENTS_DROPPED_TOTAL).increment(dropped as u64);

        info!(
            path = %source,
            dialect = %dialect,
            records = records.len(),
            dropped,
            "sbom normalized"
        );

        Ok(NormalizedDocument {
            source,
            dialect,
            records,
            dropped,
        })
    }

    /// 원시 컴포넌트를 레코드로 변환합니다.
    ///
    /// 이름이나 버전이 비어 있는 컴포넌트는 버리고, 에코시스템은 동의어 테이블로 정규화합니다.
    pub fn finalize(&self, raw: Vec<RawComponent>) -> Vec<PackageRecord> {
        raw.into_iter()
            .filter_map(|c| {
                let ecosystem = self.aliases.normalize(c.ecosystem.as_deref().unwrap_or(""));
                PackageRecord::new(
                    &c.name,
                    &c.version,
                    ecosystem,
                    c.license.as_deref().unwrap_or(""),
                )
            })
            .collect()
    }
}

/// 크기 제한을 확인한 뒤 파일을 읽습니다.
///
/// 블로킹 호출이므로 `spawn_blocking` 안에서 사용해야 합니다.
pub(crate) fn read_bounded(path: &Path, max: usize) -> Result<String, SbomParseError> {
    let io_err = |source| SbomParseError::Io {
        path: path.display().to_string(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(io_err)?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if size > max {
        return Err(SbomParseError::FileTooBig {
            path: path.display().to_string(),
            size,
            max,
        });
    }

    std::fs::read_to_string(path).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heisenberg_core::types::Ecosystem;

    fn normalizer() -> SbomNormalizer {
        SbomNormalizer::new(NormalizerConfig::default()).unwrap()
    }

    #[test]
    fn finalize_drops_incomplete_components() {
        let raw = vec![
            RawComponent {
                name: "left-pad".to_owned(),
                version: "1.3.0".to_owned(),
                ecosystem: Some("npm".to_owned()),
                license: None,
            },
            RawComponent {
                name: "no-version".to_owned(),
                version: "  ".to_owned(),
                ..Default::default()
            },
            RawComponent {
                name: String::new(),
                version: "1.0".to_owned(),
                ..Default::default()
            },
        ];
        let records = normalizer().finalize(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "left-pad");
        assert_eq!(records[0].license(), "N/A");
    }

    #[test]
    fn finalize_normalizes_ecosystem_aliases() {
        let raw = vec![RawComponent {
            name: "errors".to_owned(),
            version: "v0.9.1".to_owned(),
            ecosystem: Some("GoLang".to_owned()),
            license: None,
        }];
        let records = normalizer().finalize(raw);
        assert_eq!(records[0].ecosystem(), &Ecosystem::Go);
    }

    #[test]
    fn finalize_missing_ecosystem_is_unknown() {
        let raw = vec![RawComponent {
            name: "x".to_owned(),
            version: "1".to_owned(),
            ..Default::default()
        }];
        let records = normalizer().finalize(raw);
        assert_eq!(records[0].ecosystem(), &Ecosystem::Unknown);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = NormalizerConfig {
            max_file_size: 0,
            ..Default::default()
        };
        assert!(SbomNormalizer::new(config).is_err());
    }

    #[test]
    fn normalize_str_counts_dropped() {
        let content = "package,version,language\nleft-pad,1.3.0,npm\nbroken,,npm\n";
        let doc = normalizer()
            .normalize_str(Path::new("repo_sbom.csv"), content)
            .unwrap();
        assert_eq!(doc.dialect, SbomDialect::Tabular);
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.dropped, 1);
    }

    #[tokio::test]
    async fn normalize_file_rejects_oversized_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.json");
        std::fs::write(&path, "x".repeat(64)).unwrap();

        let config = NormalizerConfig {
            max_file_size: 16,
            ..Default::default()
        };
        let err = SbomNormalizer::new(config)
            .unwrap()
            .normalize_file(&path)
            .await
            .unwrap_err();
        assert!(matches!(err, SbomParseError::FileTooBig { size: 64, max: 16, .. }));
    }

    #[tokio::test]
    async fn normalize_file_missing_is_io_error() {
        let err = normalizer()
            .normalize_file("/nonexistent/bom.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SbomParseError::Io { .. }));
    }
}

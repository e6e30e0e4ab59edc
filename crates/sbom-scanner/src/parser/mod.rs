//! 형식별 SBOM 파서
//!
//! [`SbomParser`] trait은 각 문서 형식의 파서가 구현해야 하는 인터페이스입니다.
//! 파서는 문서 스키마만 알고, 에코시스템 정규화나 레코드 검증은
//! [`SbomNormalizer`](crate::SbomNormalizer)가 담당합니다.
//!
//! # 지원 형식
//!
//! - CycloneDX JSON / XML -- [`CycloneDxJsonParser`], [`CycloneDxXmlParser`]
//! - SPDX JSON / XML -- [`SpdxJsonParser`], [`SpdxXmlParser`]
//! - 표 형식 CSV -- [`TabularParser`]

pub mod cyclonedx;
pub mod spdx;
pub mod tabular;
pub(crate) mod xml;

pub use cyclonedx::{CycloneDxJsonParser, CycloneDxXmlParser};
pub use spdx::{SpdxJsonParser, SpdxXmlParser};
pub use tabular::TabularParser;

use crate::dialect::SbomDialect;
use crate::error::SbomParseError;

/// 정규화 전의 컴포넌트
///
/// 문서에서 읽은 값을 그대로 담습니다. 빈 값 필터링은 정규화 단계에서 합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComponent {
    /// 패키지 이름
    pub name: String,
    /// 패키지 버전
    pub version: String,
    /// 원시 에코시스템 문자열 (purl 타입 또는 언어 열)
    pub ecosystem: Option<String>,
    /// 라이선스 식별자/이름/표현식
    pub license: Option<String>,
}

/// SBOM 파서 trait
pub trait SbomParser: Send + Sync {
    /// 이 파서가 담당하는 형식
    fn dialect(&self) -> SbomDialect;

    /// 문서 내용을 파싱하여 컴포넌트 목록을 문서 순서대로 반환합니다.
    ///
    /// # Arguments
    ///
    /// - `content`: 문서 내용 (UTF-8 문자열)
    /// - `source_path`: 원본 파일 경로 (에러 메시지용)
    fn extract(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<RawComponent>, SbomParseError>;
}

/// 공백을 제거하고 비어 있으면 `None`
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_filters_blank() {
        assert_eq!(non_empty(Some("  MIT ")), Some("MIT".to_owned()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}

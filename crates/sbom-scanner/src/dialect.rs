//! SBOM 형식 판별
//!
//! [`SbomDialect`]는 지원하는 다섯 가지 문서 형식의 태그 유니온입니다.
//! 한 번 판별된 뒤에는 [`SbomDialect::parser`]로 형식별 파서에 위임됩니다.
//!
//! # 판별 규칙
//!
//! | 확장자 | 판별 방법 |
//! |---|---|
//! | `.csv` | 항상 표 형식 |
//! | `.json`, `.cdx` | `bomFormat == "CycloneDX"` 또는 `spdxVersion` 키 |
//! | `.xml` | 루트 요소의 네임스페이스+이름에 `cyclonedx` / `spdx` 포함 여부 |

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::SbomParseError;
use crate::parser::cyclonedx::{CycloneDxJsonParser, CycloneDxXmlParser};
use crate::parser::spdx::{SpdxJsonParser, SpdxXmlParser};
use crate::parser::tabular::TabularParser;
use crate::parser::{SbomParser, xml};

/// SBOM 문서 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SbomDialect {
    /// CycloneDX JSON
    CycloneDxJson,
    /// CycloneDX XML
    CycloneDxXml,
    /// SPDX JSON
    SpdxJson,
    /// SPDX XML
    SpdxXml,
    /// 표 형식 (CSV)
    Tabular,
}

impl SbomDialect {
    /// 메트릭/로그용 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CycloneDxJson => "cyclonedx-json",
            Self::CycloneDxXml => "cyclonedx-xml",
            Self::SpdxJson => "spdx-json",
            Self::SpdxXml => "spdx-xml",
            Self::Tabular => "tabular",
        }
    }

    /// 이 형식을 담당하는 파서
    pub fn parser(&self) -> &'static dyn SbomParser {
        match self {
            Self::CycloneDxJson => &CycloneDxJsonParser,
            Self::CycloneDxXml => &CycloneDxXmlParser,
            Self::SpdxJson => &SpdxJsonParser,
            Self::SpdxXml => &SpdxXmlParser,
            Self::Tabular => &TabularParser,
        }
    }

    /// 경로와 내용으로 문서 형식을 판별합니다.
    ///
    /// # Errors
    ///
    /// - 확장자나 내용으로 형식을 알 수 없으면 `FormatDetection`
    /// - JSON/XML 자체가 잘못되었으면 `Parse`
    pub fn detect(path: &Path, content: &str) -> Result<Self, SbomParseError> {
        let source = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Tabular),
            "json" | "cdx" => detect_json(content, &source),
            "xml" => detect_xml(content, &source),
            _ => Err(SbomParseError::FormatDetection { path: source }),
        }
    }
}

/// [`SbomDialect::detect`]의 함수 형태
pub fn detect_dialect(path: &Path, content: &str) -> Result<SbomDialect, SbomParseError> {
    SbomDialect::detect(path, content)
}

impl fmt::Display for SbomDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn detect_json(content: &str, source: &str) -> Result<SbomDialect, SbomParseError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| SbomParseError::Parse {
            path: source.to_owned(),
            reason: e.to_string(),
        })?;

    let is_cyclonedx = value
        .get("bomFormat")
        .and_then(|v| v.as_str())
        .is_some_and(|f| f.eq_ignore_ascii_case("CycloneDX"));
    if is_cyclonedx {
        return Ok(SbomDialect::CycloneDxJson);
    }
    if value.get("spdxVersion").is_some() {
        return Ok(SbomDialect::SpdxJson);
    }

    Err(SbomParseError::FormatDetection {
        path: source.to_owned(),
    })
}

fn detect_xml(content: &str, source: &str) -> Result<SbomDialect, SbomParseError> {
    let doc = xml::parse_document(content, source)?;
    let root = doc.root_element().tag_name();
    let qualified = format!("{}{}", root.namespace().unwrap_or(""), root.name()).to_lowercase();

    if qualified.contains("cyclonedx") {
        Ok(SbomDialect::CycloneDxXml)
    } else if qualified.contains("spdx") {
        Ok(SbomDialect::SpdxXml)
    } else {
        Err(SbomParseError::FormatDetection {
            path: source.to_owned(),
        })
    }
}

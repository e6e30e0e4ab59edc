//! 표 형식(CSV) SBOM 파서
//!
//! 저장소별 `<repo>_sbom.csv` 파일을 읽습니다.
//!
//! | 열 | 의미 |
//! |---|---|
//! | `package` | 패키지 이름 |
//! | `version` | 버전 |
//! | `language` | 에코시스템 |
//! | `license` | 라이선스 (선택) |
//!
//! 열 이름은 대소문자를 구분하지 않습니다.

use tracing::warn;

use crate::dialect::SbomDialect;
use crate::error::SbomParseError;
use crate::parser::{RawComponent, SbomParser, non_empty};

/// 표 형식 파서
pub struct TabularParser;

/// CSV 리더를 만듭니다. 행마다 열 수가 달라도 허용합니다.
pub(crate) fn csv_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes())
}

/// 헤더에서 열 위치를 찾습니다.
pub(crate) fn column_index(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
}

impl SbomParser for TabularParser {
    fn dialect(&self) -> SbomDialect {
        SbomDialect::Tabular
    }

    fn extract(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<RawComponent>, SbomParseError> {
        let parse_err = |e: csv::Error| SbomParseError::Parse {
            path: source_path.to_owned(),
            reason: e.to_string(),
        };

        let mut reader = csv_reader(content);
        let headers = reader.headers().map_err(parse_err)?.clone();

        let (Some(name_idx), Some(version_idx)) = (
            column_index(&headers, "package"),
            column_index(&headers, "version"),
        ) else {
            warn!(path = source_path, "tabular sbom lacks package/version columns");
            return Ok(Vec::new());
        };
        let language_idx = column_index(&headers, "language");
        let license_idx = column_index(&headers, "license");

        let mut components = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_err)?;
            let field = |idx: Option<usize>| idx.and_then(|i| non_empty(record.get(i)));
            components.push(RawComponent {
                name: field(Some(name_idx)).unwrap_or_default(),
                version: field(Some(version_idx)).unwrap_or_default(),
                ecosystem: field(language_idx),
                license: field(license_idx),
            });
        }

        Ok(components)
    }
}

//! 패키지 이름 매칭 -- 침해된 패키지가 SBOM에 포함되어 있는지 찾기
//!
//! [`PackageMatcher`]는 대상 패키지 이름 집합으로 표 형식 SBOM의 행을 걸러냅니다.
//! 결과 행은 원본 열을 모두 보존합니다.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::SbomParseError;
use crate::normalizer::read_bounded;
use crate::parser::tabular::{column_index, csv_reader};

/// 매칭 결과 표
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchTable {
    /// 원본 CSV 헤더
    pub header: Vec<String>,
    /// 매칭된 행 (원본 순서)
    pub rows: Vec<Vec<String>>,
}

impl MatchTable {
    /// 맨 앞에 출처 열을 추가합니다 (여러 저장소를 한 표로 합칠 때).
    pub fn with_source_column(mut self, column: &str, source: &str) -> Self {
        self.header.insert(0, column.to_owned());
        for row in &mut self.rows {
            row.insert(0, source.to_owned());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 대상 패키지 이름 매처
#[derive(Debug, Clone)]
pub struct PackageMatcher {
    targets: HashSet<String>,
    case_sensitive: bool,
}

impl PackageMatcher {
    /// 대상 이름 목록으로 매처를 만듭니다. 빈 이름은 무시합니다.
    pub fn new<I, S>(targets: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = targets
            .into_iter()
            .map(|t| t.as_ref().trim().to_owned())
            .filter(|t| !t.is_empty())
            .map(|t| if case_sensitive { t } else { t.to_lowercase() })
            .collect();
        Self {
            targets,
            case_sensitive,
        }
    }

    /// 쉼표로 구분된 목록을 파싱합니다.
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// 한 줄에 하나씩 적힌 목록을 파싱합니다. `#` 주석과 빈 줄은 건너뜁니다.
    pub fn parse_lines(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_owned)
            .collect()
    }

    /// 대상 이름 수
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// 이름이 대상 집합에 있는지 확인합니다.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        if self.case_sensitive {
            self.targets.contains(name)
        } else {
            self.targets.contains(&name.to_lowercase())
        }
    }

    /// CSV 내용에서 매칭되는 행을 찾습니다.
    ///
    /// # Errors
    ///
    /// `package` 열이 없으면 `MissingColumn`, CSV가 잘못되었으면 `Parse`
    pub fn scan_csv(&self, content: &str, source_path: &str) -> Result<MatchTable, SbomParseError> {
        let parse_err = |e: csv::Error| SbomParseError::Parse {
            path: source_path.to_owned(),
            reason: e.to_string(),
        };

        let mut reader = csv_reader(content);
        let headers = reader.headers().map_err(parse_err)?.clone();
        let package_idx =
            column_index(&headers, "package").ok_or_else(|| SbomParseError::MissingColumn {
                path: source_path.to_owned(),
                column: "package".to_owned(),
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_err)?;
            if record.get(package_idx).is_some_and(|name| self.matches(name)) {
                rows.push(record.iter().map(str::to_owned).collect());
            }
        }

        debug!(path = source_path, matches = rows.len(), "package match scan finished");

        Ok(MatchTable {
            header: headers.iter().map(str::to_owned).collect(),
            rows,
        })
    }

    /// CSV 파일에서 매칭되는 행을 찾습니다.
    pub async fn scan_file(
        &self,
        path: impl AsRef<Path>,
        max_file_size: usize,
    ) -> Result<MatchTable, SbomParseError> {
        let path = path.as_ref().to_path_buf();
        let matcher = self.clone();
        tokio::task::spawn_blocking(move || {
            let content = read_bounded(&path, max_file_size)?;
            matcher.scan_csv(&content, &path.display().to_string())
        })
        .await
        .map_err(|e| SbomParseError::Task(format!("spawn_blocking failed: {e}")))?
    }
}

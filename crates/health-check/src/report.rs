//! CSV 리포트 출력
//!
//! 열 순서는 [`REPORT_HEADER`]로 고정되며, 값이 없는 필드는
//! [`FieldValue`](crate::result::FieldValue)의 규칙대로 표시됩니다.

use std::collections::HashSet;
use std::fs::File;
use std::hash::Hash;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use heisenberg_core::types::PackageRecord;

use crate::error::HealthCheckError;
use crate::result::HealthCheckResult;

/// 리포트 열 (고정 순서)
pub const REPORT_HEADER: [&str; 19] = [
    "repo_name",
    "package",
    "version",
    "language",
    "license",
    "health_score",
    "custom_health_score",
    "description",
    "popularity_info_stars",
    "popularity_info_forks",
    "maintenance_info",
    "dependents",
    "security_info",
    "security_advisories",
    "security_score",
    "deprecated",
    "deps_url",
    "snyk_url",
    "socket_url",
];

/// 리포트 행 하나
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// 출처 식별자 (저장소/벤더 이름)
    pub source: String,
    pub record: PackageRecord,
    pub result: HealthCheckResult,
}

impl ReportRow {
    /// [`REPORT_HEADER`] 순서의 문자열 필드
    pub fn to_fields(&self) -> Vec<String> {
        let r = &self.result;
        vec![
            self.source.clone(),
            self.record.name().to_owned(),
            self.record.version().to_owned(),
            self.record.ecosystem().to_string(),
            self.record.license().to_owned(),
            r.health_score.render(),
            r.custom_health_score.render(),
            r.description.render(),
            r.stars.render(),
            r.forks.render(),
            r.maintenance_score.render(),
            r.dependents.render(),
            r.security_info(),
            r.security_advisories(),
            r.security_score.render(),
            r.deprecated.render(),
            r.links.deps_dev.clone(),
            r.links.snyk.clone(),
            r.links.socket.clone(),
        ]
    }
}

/// 헤더가 먼저 기록되는 CSV 리포트 작성기
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl ReportWriter<File> {
    /// 파일을 생성(덮어쓰기)하고 헤더를 기록합니다.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, HealthCheckError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| HealthCheckError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(file)
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Result<Self, HealthCheckError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(REPORT_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_row(&mut self, row: &ReportRow) -> Result<(), HealthCheckError> {
        self.writer.write_record(row.to_fields())?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_rows<'a>(
        &mut self,
        rows: impl IntoIterator<Item = &'a ReportRow>,
    ) -> Result<(), HealthCheckError> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// 기록한 데이터 행 수 (헤더 제외)
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// 버퍼를 비우고 내부 작성기를 돌려줍니다.
    pub fn finish(self) -> Result<W, HealthCheckError> {
        self.writer
            .into_inner()
            .map_err(|e| HealthCheckError::Report(e.to_string()))
    }
}

/// 임의의 헤더와 행으로 CSV 표를 기록합니다 (패키지 매칭 결과 등).
pub fn write_table<W: Write>(
    header: &[String],
    rows: &[Vec<String>],
    inner: W,
) -> Result<W, HealthCheckError> {
    let mut writer = csv::Writer::from_writer(inner);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| HealthCheckError::Report(e.to_string()))
}

/// 완전히 같은 행을 제거합니다. 처음 나온 순서를 유지합니다.
pub fn dedupe_rows<T: Clone + Eq + Hash>(rows: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

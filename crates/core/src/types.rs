//! 도메인 타입 -- 모든 크레이트가 공유하는 패키지 레코드
//!
//! SBOM 정규화 계층이 [`PackageRecord`]를 만들고,
//! 헬스 체크 파이프라인이 이를 소비합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 라이선스 정보가 없을 때 사용하는 값
pub const LICENSE_UNAVAILABLE: &str = "N/A";

/// 패키지 에코시스템
///
/// 문자열 표현은 항상 소문자 정규형입니다 (`npm`, `pypi`, `go`).
/// 알려지지 않은 에코시스템도 [`Ecosystem::Other`]로 보존됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Ecosystem {
    /// Node.js (npm)
    Npm,
    /// Python (PyPI)
    PyPI,
    /// Go modules
    Go,
    /// 그 밖의 purl 타입 (cargo, maven, ...)
    Other(String),
    /// 에코시스템을 판단할 수 없음
    Unknown,
}

impl Ecosystem {
    /// 정규화된 소문자 문자열에서 에코시스템을 만듭니다.
    ///
    /// 동의어 처리(`golang` → `go`)는 호출자 책임입니다.
    pub fn from_canonical(s: &str) -> Self {
        match s.trim() {
            "" | "unknown" => Self::Unknown,
            "npm" => Self::Npm,
            "pypi" => Self::PyPI,
            "go" => Self::Go,
            other => Self::Other(other.to_owned()),
        }
    }

    /// 정규형 문자열
    pub fn as_str(&self) -> &str {
        match self {
            Self::Npm => "npm",
            Self::PyPI => "pypi",
            Self::Go => "go",
            Self::Other(s) => s.as_str(),
            Self::Unknown => "unknown",
        }
    }

    /// 원격 헬스 체크가 지원되는 에코시스템인지 여부
    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Npm | Self::PyPI | Self::Go)
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Ecosystem {
    fn from(s: String) -> Self {
        Self::from_canonical(&s)
    }
}

impl From<Ecosystem> for String {
    fn from(e: Ecosystem) -> Self {
        e.as_str().to_owned()
    }
}

/// 정규화된 패키지 레코드
///
/// 모든 SBOM 형식이 이 하나의 형태로 변환됩니다.
/// 이름과 버전은 공백이 제거된 비어 있지 않은 문자열임이 보장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageRecord {
    name: String,
    version: String,
    ecosystem: Ecosystem,
    license: String,
}

impl PackageRecord {
    /// 새 레코드를 만듭니다.
    ///
    /// 공백 제거 후 이름이나 버전이 비어 있으면 `None`을 반환합니다.
    /// 라이선스가 비어 있으면 `N/A`로 채웁니다.
    pub fn new(
        name: impl AsRef<str>,
        version: impl AsRef<str>,
        ecosystem: Ecosystem,
        license: impl AsRef<str>,
    ) -> Option<Self> {
        let name = name.as_ref().trim();
        let version = version.as_ref().trim();
        if name.is_empty() || version.is_empty() {
            return None;
        }
        let license = match license.as_ref().trim() {
            "" => LICENSE_UNAVAILABLE.to_owned(),
            l => l.to_owned(),
        };
        Some(Self {
            name: name.to_owned(),
            version: version.to_owned(),
            ecosystem,
            license,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    pub fn license(&self) -> &str {
        &self.license
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.ecosystem, self.name, self.version)
    }
}

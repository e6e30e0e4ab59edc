//! 교차 확인 링크 (deps.dev, Snyk Advisor, Socket)
//!
//! 네트워크 없이 패키지 좌표만으로 만들어지므로 타임아웃/실패 행에도 항상 채워집니다.

use serde::Serialize;

use heisenberg_core::types::Ecosystem;

/// 교차 확인 링크 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReferenceLinks {
    pub deps_dev: String,
    pub snyk: String,
    pub socket: String,
}

impl CrossReferenceLinks {
    /// 패키지 좌표로 링크를 만듭니다.
    ///
    /// deps.dev 링크는 이름의 `/`를 `%2F`로 바꿉니다 (npm scope, Go 모듈 경로).
    pub fn for_package(ecosystem: &Ecosystem, name: &str, version: &str) -> Self {
        let eco = ecosystem.as_str();
        let (snyk_eco, socket_eco) = match ecosystem {
            Ecosystem::Npm => ("npm-package", "npm"),
            Ecosystem::PyPI => ("python", "pypi"),
            Ecosystem::Go => ("golang", "go"),
            _ => (eco, eco),
        };
        let safe_name = name.replace('/', "%2F");

        Self {
            deps_dev: format!("https://deps.dev/{eco}/{safe_name}/{version}"),
            snyk: format!("https://snyk.io/advisor/{snyk_eco}/{name}"),
            socket: format!("https://socket.dev/{socket_eco}/package/{name}"),
        }
    }
}

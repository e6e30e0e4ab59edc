//! 패키지 레지스트리 사용 중단(deprecation) 소스
//!
//! - npm: `GET {registry}/{name}/{version}`의 `deprecated` 메시지
//! - PyPI: `GET {pypi}/pypi/{name}/{version}/json`의
//!   `Development Status :: 7 - Inactive` 분류자
//!
//! 그 밖의 에코시스템과 레지스트리가 200 이외로 응답한 경우는 사용 중단이
//! 아닌 것으로 봅니다 (`None`). 전송 오류만 `N/A`로 남습니다.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use heisenberg_core::types::Ecosystem;

use crate::config::SourceConfig;
use crate::result::Deprecation;
use crate::signal::http::{Fetched, HttpClient};
use crate::signal::{SignalFetcher, SignalRequest, SignalResult};

const NPM: &str = "npm";
const PYPI: &str = "pypi";

const INACTIVE_CLASSIFIER: &str = "development status :: 7 - inactive";
const INACTIVE_MESSAGE: &str = "Inactive/Deprecated (Development Status :: 7 - Inactive)";

#[derive(Debug, Deserialize)]
struct NpmVersionResponse {
    /// 보통 문자열이지만 일부 문서는 `false`를 사용
    deprecated: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PypiReleaseResponse {
    info: Option<PypiInfo>,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    #[serde(default)]
    classifiers: Option<Vec<String>>,
}

fn npm_deprecation(body: NpmVersionResponse) -> Deprecation {
    match body.deprecated {
        Some(Value::String(msg)) if !msg.trim().is_empty() => Deprecation::Deprecated(msg),
        _ => Deprecation::NotDeprecated,
    }
}

fn pypi_deprecation(body: PypiReleaseResponse) -> Deprecation {
    let inactive = body
        .info
        .and_then(|i| i.classifiers)
        .unwrap_or_default()
        .iter()
        .any(|c| c.trim().eq_ignore_ascii_case(INACTIVE_CLASSIFIER));
    if inactive {
        Deprecation::Deprecated(INACTIVE_MESSAGE.to_owned())
    } else {
        Deprecation::NotDeprecated
    }
}

fn not_deprecated(base: SignalResult) -> SignalResult {
    SignalResult {
        deprecation: Some(Deprecation::NotDeprecated),
        ..base
    }
}

/// npm/PyPI 사용 중단 소스
#[derive(Debug, Clone)]
pub struct DeprecationFetcher {
    http: HttpClient,
    npm_registry_url: String,
    pypi_url: String,
}

impl DeprecationFetcher {
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            npm_registry_url: config.npm_registry_url.clone(),
            pypi_url: config.pypi_url.clone(),
        }
    }

    async fn fetch_npm(&self, request: &SignalRequest) -> SignalResult {
        let url = format!(
            "{}/{}/{}",
            self.npm_registry_url, request.name, request.version
        );
        match self
            .http
            .get_json::<NpmVersionResponse>(NPM, &url, None)
            .await
        {
            Ok(Fetched::Found(body)) => SignalResult {
                deprecation: Some(npm_deprecation(body)),
                ..SignalResult::found()
            },
            Ok(Fetched::Missing(status)) => {
                debug!(
                    package = %request.name,
                    status = status.as_u16(),
                    "npm registry lookup failed"
                );
                not_deprecated(SignalResult::not_found())
            }
            Err(e) => SignalResult::unavailable(e),
        }
    }

    async fn fetch_pypi(&self, request: &SignalRequest) -> SignalResult {
        let url = format!(
            "{}/pypi/{}/{}/json",
            self.pypi_url, request.name, request.version
        );
        match self
            .http
            .get_json::<PypiReleaseResponse>(PYPI, &url, None)
            .await
        {
            Ok(Fetched::Found(body)) => SignalResult {
                deprecation: Some(pypi_deprecation(body)),
                ..SignalResult::found()
            },
            Ok(Fetched::Missing(status)) => {
                debug!(package = %request.name, status = status.as_u16(), "pypi lookup failed");
                not_deprecated(SignalResult::not_found())
            }
            Err(e) => SignalResult::unavailable(e),
        }
    }
}

impl SignalFetcher for DeprecationFetcher {
    fn name(&self) -> &'static str {
        "deprecation"
    }

    async fn fetch(&self, request: &SignalRequest) -> SignalResult {
        match request.ecosystem {
            Ecosystem::Npm => self.fetch_npm(request).await,
            Ecosystem::PyPI => self.fetch_pypi(request).await,
            _ => not_deprecated(SignalResult::found()),
        }
    }
}

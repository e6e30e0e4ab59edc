//! 패키지 헬스 체커
//!
//! [`HealthChecker`]는 버전 소스로 패키지 존재를 확인한 뒤,
//! 보강 소스들의 시그널을 합쳐 [`HealthCheckResult`]를 만듭니다.
//!
//! ```text
//! version fetcher --NotFound--> HealthCheckResult::not_found
//!        |
//!      Found (project id)
//!        |
//! enrichers (dependents, project, deprecation) --merge--> score + freshness + links
//! ```

use std::future::Future;

use chrono::Utc;
use metrics::counter;
use tracing::{debug, warn};

use heisenberg_core::metrics as m;
use heisenberg_core::types::PackageRecord;

use crate::config::SourceConfig;
use crate::error::{HealthCheckError, TaskError};
use crate::links::CrossReferenceLinks;
use crate::result::HealthCheckResult;
use crate::signal::{
    DepsDevDependentsFetcher, DepsDevVersionFetcher, DeprecationFetcher, DynSignalFetcher,
    HttpClient, Presence, ProjectFetcher, SignalRequest,
};

/// 패키지 하나를 체크하는 루틴
///
/// 오케스트레이터가 `Arc<C>`로 공유하여 여러 태스크에서 동시에 호출합니다.
pub trait PackageChecker: Send + Sync + 'static {
    fn check(
        &self,
        record: &PackageRecord,
    ) -> impl Future<Output = Result<HealthCheckResult, TaskError>> + Send;
}

/// 시그널 소스를 조합한 기본 체커
pub struct HealthChecker {
    version: Box<dyn DynSignalFetcher>,
    enrichers: Vec<Box<dyn DynSignalFetcher>>,
}

impl HealthChecker {
    /// 버전 소스만으로 체커를 만듭니다.
    pub fn new(version: Box<dyn DynSignalFetcher>) -> Self {
        Self {
            version,
            enrichers: Vec::new(),
        }
    }

    /// 보강 소스를 추가합니다. 추가한 순서대로 실행되고 먼저 채운 값이 우선합니다.
    pub fn with_enricher(mut self, fetcher: Box<dyn DynSignalFetcher>) -> Self {
        self.enrichers.push(fetcher);
        self
    }

    /// deps.dev, GitHub, npm, PyPI 소스로 구성된 체커를 만듭니다.
    pub fn from_sources(config: &SourceConfig) -> Result<Self, HealthCheckError> {
        config.validate()?;
        let http = HttpClient::new(config)?;

        Ok(
            Self::new(Box::new(DepsDevVersionFetcher::new(http.clone(), config)))
                .with_enricher(Box::new(DepsDevDependentsFetcher::new(http.clone(), config)))
                .with_enricher(Box::new(ProjectFetcher::new(http.clone(), config)))
                .with_enricher(Box::new(DeprecationFetcher::new(http, config))),
        )
    }

    /// 보강 소스 이름 목록
    pub fn enricher_names(&self) -> Vec<&'static str> {
        self.enrichers.iter().map(|e| e.name()).collect()
    }
}

impl PackageChecker for HealthChecker {
    async fn check(&self, record: &PackageRecord) -> Result<HealthCheckResult, TaskError> {
        let ecosystem = record.ecosystem();
        if !ecosystem.is_checkable() {
            return Err(TaskError::UnsupportedEcosystem(ecosystem.to_string()));
        }

        let links = CrossReferenceLinks::for_package(ecosystem, record.name(), record.version());
        let mut request = SignalRequest::for_record(record);

        let mut signals = self.version.fetch(&request).await;
        match &signals.presence {
            Presence::Found => {}
            Presence::NotFound => {
                debug!(package = %record, "package version not found");
                return Ok(HealthCheckResult::not_found(links));
            }
            Presence::Unavailable(e) => {
                counter!(m::CHECK_SIGNAL_FAILURES_TOTAL, m::LABEL_SOURCE => self.version.name())
                    .increment(1);
                return Err(e.clone());
            }
        }

        request.project_id = signals.project_id.clone();
        for enricher in &self.enrichers {
            let result = enricher.fetch(&request).await;
            if let Presence::Unavailable(e) = &result.presence {
                warn!(
                    package = %record,
                    source = enricher.name(),
                    error = %e,
                    "signal source unavailable"
                );
                counter!(m::CHECK_SIGNAL_FAILURES_TOTAL, m::LABEL_SOURCE => enricher.name())
                    .increment(1);
            }
            signals.merge(result);
        }

        Ok(HealthCheckResult::from_signals(&signals, Utc::now(), links))
    }
}

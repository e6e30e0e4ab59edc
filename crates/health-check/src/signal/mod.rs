//! 외부 시그널 소스
//!
//! 각 소스는 [`SignalFetcher`]를 구현하고, 에러 대신 [`Presence`]로 결과 상태를 알립니다.
//! [`HealthChecker`](crate::HealthChecker)는 [`DynSignalFetcher`] 목록으로 소스를 조합합니다.
//!
//! | 소스 | 제공 시그널 |
//! |---|---|
//! | [`DepsDevVersionFetcher`] | 보안 권고, 게시 시각, 프로젝트 ID |
//! | [`DepsDevDependentsFetcher`] | 의존 패키지 수 |
//! | [`ProjectFetcher`] | scorecard, 설명, stars/forks (GitHub 폴백) |
//! | [`DeprecationFetcher`] | npm/PyPI 사용 중단 여부 |

pub mod deps_dev;
pub mod http;
pub mod registry;

use std::future::Future;
use std::pin::Pin;

use heisenberg_core::types::{Ecosystem, PackageRecord};

use crate::error::TaskError;
use crate::result::Deprecation;

pub use deps_dev::{DepsDevDependentsFetcher, DepsDevVersionFetcher, ProjectFetcher};
pub use http::HttpClient;
pub use registry::DeprecationFetcher;

/// `Send` 가능한 boxed future
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// 시그널 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRequest {
    pub ecosystem: Ecosystem,
    pub name: String,
    pub version: String,
    /// 버전 조회에서 얻은 관련 프로젝트 ID (예: `github.com/owner/repo`)
    pub project_id: Option<String>,
}

impl SignalRequest {
    pub fn for_record(record: &PackageRecord) -> Self {
        Self {
            ecosystem: record.ecosystem().clone(),
            name: record.name().to_owned(),
            version: record.version().to_owned(),
            project_id: None,
        }
    }
}

/// 소스가 대상을 찾았는지 여부
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Presence {
    #[default]
    Found,
    NotFound,
    /// 전송/해석 실패
    Unavailable(TaskError),
}

/// 소스 하나가 돌려준 시그널
///
/// 모르는 값은 `None`으로 남고, [`merge`](Self::merge)로 여러 소스를 합칩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalResult {
    pub presence: Presence,
    pub overall_score: Option<f64>,
    pub description: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub maintenance_score: Option<f64>,
    pub vulnerability_score: Option<f64>,
    pub dependents: Option<u64>,
    pub advisory_ids: Option<Vec<String>>,
    pub deprecation: Option<Deprecation>,
    pub published_at: Option<String>,
    pub project_id: Option<String>,
}

impl SignalResult {
    pub fn found() -> Self {
        Self::default()
    }

    pub fn not_found() -> Self {
        Self {
            presence: Presence::NotFound,
            ..Self::default()
        }
    }

    pub fn unavailable(error: TaskError) -> Self {
        Self {
            presence: Presence::Unavailable(error),
            ..Self::default()
        }
    }

    /// 비어 있는 필드를 `other`의 값으로 채웁니다.
    ///
    /// 이미 채워진 필드와 `presence`는 바뀌지 않습니다.
    pub fn merge(&mut self, other: SignalResult) {
        fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
            if slot.is_none() {
                *slot = value;
            }
        }

        fill(&mut self.overall_score, other.overall_score);
        fill(&mut self.description, other.description);
        fill(&mut self.stars, other.stars);
        fill(&mut self.forks, other.forks);
        fill(&mut self.maintenance_score, other.maintenance_score);
        fill(&mut self.vulnerability_score, other.vulnerability_score);
        fill(&mut self.dependents, other.dependents);
        fill(&mut self.advisory_ids, other.advisory_ids);
        fill(&mut self.deprecation, other.deprecation);
        fill(&mut self.published_at, other.published_at);
        fill(&mut self.project_id, other.project_id);
    }
}

/// 시그널 소스 trait
///
/// 실패는 에러가 아니라 [`Presence::Unavailable`]로 돌려줍니다.
pub trait SignalFetcher: Send + Sync + 'static {
    /// 로그/메트릭에 쓰이는 소스 이름
    fn name(&self) -> &'static str;

    /// 요청에 대한 시그널을 가져옵니다.
    fn fetch(&self, request: &SignalRequest) -> impl Future<Output = SignalResult> + Send;
}

/// dyn-compatible 시그널 소스 trait
///
/// `SignalFetcher`는 RPITIT를 사용하므로 trait object로 쓸 수 없습니다.
/// `DynSignalFetcher`는 `BoxFuture`를 반환하여 `Vec<Box<dyn DynSignalFetcher>>`로
/// 소스를 조합할 수 있게 합니다.
pub trait DynSignalFetcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch<'a>(&'a self, request: &'a SignalRequest) -> BoxFuture<'a, SignalResult>;
}

/// SignalFetcher를 구현한 타입은 자동으로 DynSignalFetcher도 구현됩니다.
impl<T: SignalFetcher> DynSignalFetcher for T {
    fn name(&self) -> &'static str {
        SignalFetcher::name(self)
    }

    fn fetch<'a>(&'a self, request: &'a SignalRequest) -> BoxFuture<'a, SignalResult> {
        Box::pin(SignalFetcher::fetch(self, request))
    }
}

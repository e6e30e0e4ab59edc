//! 헬스 체크 결과
//!
//! 네트워크에서 얻는 모든 필드는 [`FieldValue`]로 감싸져 있어,
//! 일부 소스가 실패해도 나머지 필드는 그대로 출력됩니다.
//!
//! | 상태 | 출력 |
//! |---|---|
//! | `Present(v)` | 값 |
//! | `Unavailable` | `N/A` |
//! | `NotFound` | `Not Found` |
//! | `Timeout` | `Timeout` |
//! | `Error(msg)` | `Error: msg` |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::freshness::{self, Freshness};
use crate::links::CrossReferenceLinks;
use crate::score::{CustomScore, ScoreInputs, compute_custom_score};
use crate::signal::SignalResult;

/// 값이 없을 때의 출력
pub const UNAVAILABLE: &str = "N/A";
/// 패키지 버전을 찾지 못했을 때의 출력
pub const NOT_FOUND: &str = "Not Found";
/// 태스크 타임아웃 시의 출력
pub const TIMEOUT: &str = "Timeout";
/// 보안 권고가 없거나 더 이상 사용 중단되지 않은 경우의 출력
pub const NONE: &str = "None";

/// 네트워크 유래 필드 값
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    Present(T),
    Unavailable,
    NotFound,
    Timeout,
    Error(String),
}

impl<T> FieldValue<T> {
    /// `Some`이면 `Present`, `None`이면 `Unavailable`
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Unavailable, Self::Present)
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// 값이 아닌 상태의 출력 문자열. `Present`면 `None`.
    pub fn sentinel(&self) -> Option<String> {
        match self {
            Self::Present(_) => None,
            Self::Unavailable => Some(UNAVAILABLE.to_owned()),
            Self::NotFound => Some(NOT_FOUND.to_owned()),
            Self::Timeout => Some(TIMEOUT.to_owned()),
            Self::Error(msg) => Some(format!("Error: {msg}")),
        }
    }

    /// 값은 `f`로, 나머지 상태는 표의 규칙대로 출력합니다.
    pub fn render_with(&self, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Self::Present(v) => f(v),
            other => other.sentinel().unwrap_or_default(),
        }
    }
}

impl<T: fmt::Display> FieldValue<T> {
    pub fn render(&self) -> String {
        self.render_with(ToString::to_string)
    }
}

impl<T: fmt::Display> fmt::Display for FieldValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<T: Serialize> Serialize for FieldValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(v) => v.serialize(serializer),
            other => serializer.serialize_str(&other.sentinel().unwrap_or_default()),
        }
    }
}

/// 사용 중단(deprecated) 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    NotDeprecated,
    /// 레지스트리가 제공한 사유
    Deprecated(String),
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDeprecated => f.write_str(NONE),
            Self::Deprecated(msg) => f.write_str(msg),
        }
    }
}

impl Serialize for Deprecation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 패키지 하나의 헬스 체크 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCheckResult {
    /// 상위 소스의 종합 점수 (deps.dev scorecard)
    pub health_score: FieldValue<f64>,
    pub description: FieldValue<String>,
    pub stars: FieldValue<u64>,
    pub forks: FieldValue<u64>,
    /// scorecard `Maintained` 점수
    pub maintenance_score: FieldValue<f64>,
    /// 이 버전에 의존하는 패키지 수
    pub dependents: FieldValue<u64>,
    /// 보안 권고 ID 목록 (빈 목록이면 권고 없음)
    pub security_advisory_ids: FieldValue<Vec<String>>,
    /// scorecard `Vulnerabilities` 점수
    pub security_score: FieldValue<f64>,
    pub deprecated: FieldValue<Deprecation>,
    pub custom_health_score: FieldValue<CustomScore>,
    /// 원본 RFC 3339 게시 시각
    pub published_at: FieldValue<String>,
    pub freshness: FieldValue<Freshness>,
    pub links: CrossReferenceLinks,
}

impl HealthCheckResult {
    /// 모든 네트워크 필드를 같은 상태로 채웁니다.
    fn uniform(state: FieldValue<()>, links: CrossReferenceLinks) -> Self {
        fn cast<T>(value: FieldValue<()>) -> FieldValue<T> {
            match value {
                FieldValue::Present(()) | FieldValue::Unavailable => FieldValue::Unavailable,
                FieldValue::NotFound => FieldValue::NotFound,
                FieldValue::Timeout => FieldValue::Timeout,
                FieldValue::Error(msg) => FieldValue::Error(msg),
            }
        }

        Self {
            health_score: cast(state.clone()),
            description: cast(state.clone()),
            stars: cast(state.clone()),
            forks: cast(state.clone()),
            maintenance_score: cast(state.clone()),
            dependents: cast(state.clone()),
            security_advisory_ids: cast(state.clone()),
            security_score: cast(state.clone()),
            deprecated: cast(state.clone()),
            custom_health_score: cast(state.clone()),
            published_at: cast(state.clone()),
            freshness: cast(state.clone()),
            links,
        }
    }

    /// 패키지 버전을 찾지 못한 결과
    ///
    /// 종합 점수만 `Not Found`이고, 보안 권고는 "없음", 나머지는 `N/A`입니다.
    pub fn not_found(links: CrossReferenceLinks) -> Self {
        Self {
            health_score: FieldValue::NotFound,
            security_advisory_ids: FieldValue::Present(Vec::new()),
            ..Self::uniform(FieldValue::Unavailable, links)
        }
    }

    /// 태스크 타임아웃 결과 (모든 네트워크 필드 `Timeout`)
    pub fn timed_out(links: CrossReferenceLinks) -> Self {
        Self::uniform(FieldValue::Timeout, links)
    }

    /// 태스크 실패 결과 (모든 네트워크 필드 `Error: msg`)
    pub fn failed(message: impl Into<String>, links: CrossReferenceLinks) -> Self {
        Self::uniform(FieldValue::Error(message.into()), links)
    }

    /// 수집된 시그널로 결과를 만듭니다.
    ///
    /// 버전이 확인된 패키지는 stars/forks가 없어도 0으로 점수를 계산합니다.
    /// 출력되는 stars/forks 값은 `N/A`로 남습니다.
    pub fn from_signals(
        signals: &SignalResult,
        now: DateTime<Utc>,
        links: CrossReferenceLinks,
    ) -> Self {
        let inputs = ScoreInputs {
            stars: Some(signals.stars.unwrap_or(0) as f64),
            forks: Some(signals.forks.unwrap_or(0) as f64),
            maintenance: signals.maintenance_score,
            vulnerability: signals.vulnerability_score,
            dependents: signals.dependents.map(|d| d as f64),
            overall: signals.overall_score,
        };

        let freshness = signals
            .published_at
            .as_deref()
            .and_then(|published| freshness::evaluate(published, now));

        Self {
            health_score: FieldValue::from_option(signals.overall_score),
            description: FieldValue::from_option(signals.description.clone()),
            stars: FieldValue::from_option(signals.stars),
            forks: FieldValue::from_option(signals.forks),
            maintenance_score: FieldValue::from_option(signals.maintenance_score),
            dependents: FieldValue::from_option(signals.dependents),
            security_advisory_ids: FieldValue::Present(
                signals.advisory_ids.clone().unwrap_or_default(),
            ),
            security_score: FieldValue::from_option(signals.vulnerability_score),
            deprecated: FieldValue::from_option(signals.deprecation.clone()),
            custom_health_score: FieldValue::Present(compute_custom_score(&inputs)),
            published_at: FieldValue::from_option(signals.published_at.clone()),
            freshness: FieldValue::from_option(freshness),
            links,
        }
    }

    /// `security_info` 열: 권고 수, 없으면 `None`
    pub fn security_info(&self) -> String {
        self.security_advisory_ids.render_with(|ids| {
            if ids.is_empty() {
                NONE.to_owned()
            } else {
                ids.len().to_string()
            }
        })
    }

    /// `security_advisories` 열: `, `로 이은 ID 목록, 없으면 `N/A`
    pub fn security_advisories(&self) -> String {
        self.security_advisory_ids.render_with(|ids| {
            if ids.is_empty() {
                UNAVAILABLE.to_owned()
            } else {
                ids.join(", ")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heisenberg_core::types::Ecosystem;

    fn links() -> CrossReferenceLinks {
        CrossReferenceLinks::for_package(&Ecosystem::Npm, "left-pad", "1.3.0")
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn field_value_renders_sentinels() {
        assert_eq!(FieldValue::Present(42u64).render(), "42");
        assert_eq!(FieldValue::<u64>::Unavailable.render(), "N/A");
        assert_eq!(FieldValue::<u64>::NotFound.render(), "Not Found");
        assert_eq!(FieldValue::<u64>::Timeout.render(), "Timeout");
        assert_eq!(
            FieldValue::<u64>::Error("boom".to_owned()).render(),
            "Error: boom"
        );
    }

    #[test]
    fn field_value_serializes_value_or_sentinel() {
        assert_eq!(
            serde_json::to_string(&FieldValue::Present(7.5)).unwrap(),
            "7.5"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::<f64>::Timeout).unwrap(),
            "\"Timeout\""
        );
    }

    #[test]
    fn not_found_result_shape() {
        let result = HealthCheckResult::not_found(links());
        assert_eq!(result.health_score.render(), "Not Found");
        assert_eq!(result.description.render(), "N/A");
        assert_eq!(result.deprecated.render(), "N/A");
        assert_eq!(result.security_info(), "None");
        assert_eq!(result.security_advisories(), "N/A");
        assert_eq!(result.links, links());
    }

    #[test]
    fn timed_out_result_marks_every_field() {
        let result = HealthCheckResult::timed_out(links());
        assert_eq!(result.health_score.render(), "Timeout");
        assert_eq!(result.custom_health_score.render(), "Timeout");
        assert_eq!(result.security_info(), "Timeout");
        assert_eq!(result.freshness.render(), "Timeout");
        assert_eq!(result.links.snyk, "https://snyk.io/advisor/npm-package/left-pad");
    }

    #[test]
    fn failed_result_carries_message() {
        let result = HealthCheckResult::failed("deps.dev request failed: refused", links());
        assert_eq!(
            result.stars.render(),
            "Error: deps.dev request failed: refused"
        );
        assert_eq!(
            result.security_advisories(),
            "Error: deps.dev request failed: refused"
        );
    }

    #[test]
    fn from_signals_fills_present_fields() {
        let signals = SignalResult {
            overall_score: Some(5.2),
            stars: Some(100),
            forks: Some(20),
            maintenance_score: Some(8.0),
            vulnerability_score: Some(5.0),
            dependents: Some(50),
            advisory_ids: Some(vec!["GHSA-1".to_owned(), "GHSA-2".to_owned()]),
            deprecation: Some(Deprecation::NotDeprecated),
            published_at: Some("2024-03-10T06:00:00Z".to_owned()),
            ..SignalResult::found()
        };
        let result = HealthCheckResult::from_signals(&signals, now(), links());

        assert_eq!(result.health_score.render(), "5.2");
        assert_eq!(result.description.render(), "N/A");
        // (5.2 + 6.6) / 2 = 5.9
        assert_eq!(result.custom_health_score.render(), "5.9");
        assert_eq!(result.security_info(), "2");
        assert_eq!(result.security_advisories(), "GHSA-1, GHSA-2");
        assert_eq!(result.deprecated.render(), "None");
        assert_eq!(result.freshness.render(), "Yes");
    }

    #[test]
    fn from_signals_scores_without_popularity() {
        let result = HealthCheckResult::from_signals(&SignalResult::found(), now(), links());
        assert_eq!(result.stars.render(), "N/A");
        assert_eq!(
            result.custom_health_score,
            FieldValue::Present(CustomScore::Score(0.0))
        );
        assert_eq!(result.published_at.render(), "N/A");
        assert_eq!(result.freshness.render(), "N/A");
    }
}

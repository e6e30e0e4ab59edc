//! 커스텀 헬스 점수 계산
//!
//! 인기도(stars + forks), 유지보수, 취약점, 의존 프로젝트 수를 가중 합산하고
//! 상위 소스의 종합 점수가 있으면 그 값과 평균을 냅니다.
//!
//! ```text
//! popularity = min(ln(1 + stars + forks) / 2.5 * 10, 10)
//! dependent  = min(ln(1 + dependents) / 10 * 10, 10)
//! weighted   = round1(popularity*0.25 + maintenance*0.2 + vulnerability*0.3 + dependent*0.25)
//! result     = overall 있음 ? round1((overall + weighted) / 2) : weighted
//! ```

use std::fmt;

use serde::Serialize;

/// 점수 계산 입력
///
/// `stars`/`forks`는 필수이고, 나머지는 없으면 0으로 계산됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    pub stars: Option<f64>,
    pub forks: Option<f64>,
    pub maintenance: Option<f64>,
    pub vulnerability: Option<f64>,
    pub dependents: Option<f64>,
    /// 상위 소스의 종합 점수 (deps.dev scorecard)
    pub overall: Option<f64>,
}

/// 계산 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomScore {
    Score(f64),
    Unknown,
}

impl Serialize for CustomScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(score) => serializer.serialize_f64(*score),
            Self::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl fmt::Display for CustomScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{score:.1}"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// 커스텀 점수를 계산합니다.
///
/// `stars`나 `forks`가 없거나, 입력 중 하나라도 유한하지 않거나, 개수(stars, forks,
/// dependents)가 음수이면 `Unknown`. scorecard의 `-1`(판정 불가) 같은 음수 점수는
/// 그대로 가중 합산에 들어갑니다.
/// 종합 점수가 유한하지 않으면 조용히 가중 점수만 사용합니다.
pub fn compute_custom_score(inputs: &ScoreInputs) -> CustomScore {
    let (Some(stars), Some(forks)) = (inputs.stars, inputs.forks) else {
        return CustomScore::Unknown;
    };
    let maintenance = inputs.maintenance.unwrap_or(0.0);
    let vulnerability = inputs.vulnerability.unwrap_or(0.0);
    let dependents = inputs.dependents.unwrap_or(0.0);

    if [stars, forks, maintenance, vulnerability, dependents]
        .iter()
        .any(|v| !v.is_finite())
    {
        return CustomScore::Unknown;
    }
    if [stars, forks, dependents].iter().any(|v| *v < 0.0) {
        return CustomScore::Unknown;
    }

    let popularity = ((stars + forks).ln_1p() / 2.5 * 10.0).min(10.0);
    let dependent = (dependents.ln_1p() / 10.0 * 10.0).min(10.0);
    let weighted = round1(
        popularity * 0.25 + maintenance * 0.2 + vulnerability * 0.3 + dependent * 0.25,
    );

    match inputs.overall {
        Some(overall) if overall.is_finite() => {
            CustomScore::Score(round1((overall + weighted) / 2.0))
        }
        _ => CustomScore::Score(weighted),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

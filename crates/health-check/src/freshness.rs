//! 게시 신선도 -- 최근 24시간 안에 게시된 버전인지 판단

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// 신선도 판정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Freshness {
    /// 24시간 이내 게시
    Yes,
    No,
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("Yes"),
            Self::No => f.write_str("No"),
        }
    }
}

/// RFC 3339 게시 시각과 현재 시각으로 신선도를 판단합니다.
///
/// 파싱할 수 없으면 `None`.
pub fn evaluate(published_at: &str, now: DateTime<Utc>) -> Option<Freshness> {
    let published = DateTime::parse_from_rfc3339(published_at.trim()).ok()?;
    let elapsed = now.signed_duration_since(published.with_timezone(&Utc));
    if elapsed < TimeDelta::hours(24) {
        Some(Freshness::Yes)
    } else {
        Some(Freshness::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn recent_publish_is_fresh() {
        assert_eq!(evaluate("2024-03-10T01:00:00Z", now()), Some(Freshness::Yes));
    }

    #[test]
    fn day_old_publish_is_not_fresh() {
        assert_eq!(evaluate("2024-03-09T12:00:00Z", now()), Some(Freshness::No));
        assert_eq!(evaluate("2019-01-01T00:00:00Z", now()), Some(Freshness::No));
    }

    #[test]
    fn offset_timestamps_are_normalized() {
        // 2024-03-10T10:00:00Z
        assert_eq!(
            evaluate("2024-03-10T19:00:00+09:00", now()),
            Some(Freshness::Yes)
        );
    }

    #[test]
    fn unparsable_timestamp_is_none() {
        assert_eq!(evaluate("yesterday", now()), None);
        assert_eq!(evaluate("", now()), None);
    }
}

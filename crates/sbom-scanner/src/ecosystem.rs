//! 에코시스템 문자열 정규화
//!
//! 문서마다 에코시스템 표기가 제각각이므로(`golang`, `Go`, `go`)
//! [`EcosystemAliases`] 동의어 테이블을 거쳐 [`Ecosystem`]으로 변환합니다.
//! 테이블은 설정으로 확장할 수 있고, 정규화는 멱등입니다.

use std::collections::BTreeMap;

use heisenberg_core::types::Ecosystem;

/// 에코시스템 동의어 테이블 (별칭 → 정규형)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcosystemAliases {
    table: BTreeMap<String, String>,
}

impl EcosystemAliases {
    /// 기본 테이블 (`golang` → `go`)
    pub fn new() -> Self {
        Self::empty().with_alias("golang", "go")
    }

    /// 빈 테이블
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// 기본 테이블에 설정의 별칭 맵을 더합니다. 키와 값은 소문자로 정리됩니다.
    ///
    /// 같은 별칭이 설정에 있으면 설정 값이 우선합니다.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        map.iter()
            .fold(Self::new(), |aliases, (alias, canonical)| {
                aliases.with_alias(alias, canonical)
            })
    }

    /// 별칭을 추가합니다.
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.table
            .insert(alias.trim().to_lowercase(), canonical.trim().to_lowercase());
        self
    }

    /// 등록된 별칭 수
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 원시 문자열을 정규형 이름으로 변환합니다.
    ///
    /// 별칭이 연쇄된 경우 고정점까지 따라가며, 순환은 테이블 크기만큼만 추적합니다.
    pub fn canonical_name(&self, raw: &str) -> String {
        let mut current = raw.trim().to_lowercase();
        for _ in 0..=self.table.len() {
            match self.table.get(&current) {
                Some(next) if *next != current => current = next.clone(),
                _ => break,
            }
        }
        current
    }

    /// 원시 문자열을 [`Ecosystem`]으로 정규화합니다.
    pub fn normalize(&self, raw: &str) -> Ecosystem {
        Ecosystem::from_canonical(&self.canonical_name(raw))
    }
}

impl Default for EcosystemAliases {
    fn default() -> Self {
        Self::new()
    }
}

/// purl에서 타입 세그먼트를 추출합니다.
///
/// `pkg:npm/left-pad@1.3.0` → `npm`. `pkg:` 스킴이 없거나 타입이 비어 있으면 `None`.
pub fn purl_type(purl: &str) -> Option<String> {
    let purl = purl.trim();
    let scheme = purl.get(..4)?;
    if !scheme.eq_ignore_ascii_case("pkg:") {
        return None;
    }
    let ty = purl[4..].trim_start_matches('/').split('/').next()?;
    let ty = ty.split(['@', '?', '#']).next().unwrap_or_default();
    if ty.is_empty() {
        None
    } else {
        Some(ty.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golang_maps_to_go() {
        let aliases = EcosystemAliases::new();
        assert_eq!(aliases.normalize("golang"), Ecosystem::Go);
        assert_eq!(aliases.normalize("GoLang"), Ecosystem::Go);
        assert_eq!(aliases.normalize("go"), Ecosystem::Go);
    }

    #[test]
    fn normalization_is_idempotent() {
        let aliases = EcosystemAliases::new()
            .with_alias("pip", "python")
            .with_alias("python", "pypi");
        for raw in ["golang", "go", "pip", "python", "PyPI", "npm", "cargo", ""] {
            let once = aliases.normalize(raw);
            let twice = aliases.normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
        assert_eq!(aliases.normalize("pip"), Ecosystem::PyPI);
    }

    #[test]
    fn alias_cycle_terminates() {
        let aliases = EcosystemAliases::empty()
            .with_alias("a", "b")
            .with_alias("b", "a");
        let name = aliases.canonical_name("a");
        assert!(name == "a" || name == "b");
    }

    #[test]
    fn from_map_lowercases_entries() {
        let map = BTreeMap::from([("Node".to_owned(), "NPM".to_owned())]);
        let aliases = EcosystemAliases::from_map(&map);
        assert_eq!(aliases.normalize("node"), Ecosystem::Npm);
    }

    #[test]
    fn from_map_keeps_default_golang_alias() {
        let map = BTreeMap::from([("pip".to_owned(), "pypi".to_owned())]);
        let aliases = EcosystemAliases::from_map(&map);
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.normalize("golang"), Ecosystem::Go);
        assert_eq!(aliases.normalize("pip"), Ecosystem::PyPI);
    }

    #[test]
    fn from_map_empty_is_default_table() {
        let aliases = EcosystemAliases::from_map(&BTreeMap::new());
        assert_eq!(aliases, EcosystemAliases::new());
    }

    #[test]
    fn unknown_values_are_preserved() {
        let aliases = EcosystemAliases::new();
        assert_eq!(
            aliases.normalize("Maven"),
            Ecosystem::Other("maven".to_owned())
        );
        assert_eq!(aliases.normalize("  "), Ecosystem::Unknown);
    }

    #[test]
    fn purl_type_extracts_segment() {
        assert_eq!(purl_type("pkg:npm/left-pad@1.3.0").as_deref(), Some("npm"));
        assert_eq!(
            purl_type("pkg:golang/github.com/pkg/errors@v0.9.1").as_deref(),
            Some("golang")
        );
        assert_eq!(
            purl_type("pkg:npm/%40babel/core@7.0.0").as_deref(),
            Some("npm")
        );
        assert_eq!(purl_type("PKG:PyPI/requests@2.31.0").as_deref(), Some("pypi"));
    }

    #[test]
    fn purl_type_tolerates_leading_slashes() {
        assert_eq!(purl_type("pkg://npm/left-pad").as_deref(), Some("npm"));
    }

    #[test]
    fn purl_type_rejects_invalid() {
        assert_eq!(purl_type(""), None);
        assert_eq!(purl_type("npm/left-pad@1.3.0"), None);
        assert_eq!(purl_type("pkg:"), None);
        assert_eq!(purl_type("pkg:/"), None);
    }
}

//! CycloneDX 파서 (JSON / XML)
//!
//! # 라이선스 선택 규칙
//!
//! 첫 번째 `licenses` 항목만 봅니다: `license.id` > `license.name` > `expression`.
//! 아무것도 없으면 `None`이고, 정규화 단계에서 `N/A`가 됩니다.
//!
//! # JSON 형식 예시
//!
//! ```json
//! {
//!   "bomFormat": "CycloneDX",
//!   "components": [
//!     { "name": "left-pad", "version": "1.3.0", "purl": "pkg:npm/left-pad@1.3.0",
//!       "licenses": [ { "license": { "id": "MIT" } } ] }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::dialect::SbomDialect;
use crate::ecosystem::purl_type;
use crate::error::SbomParseError;
use crate::parser::{RawComponent, SbomParser, non_empty, xml};

/// CycloneDX JSON 파서
pub struct CycloneDxJsonParser;

/// CycloneDX XML 파서
pub struct CycloneDxXmlParser;

#[derive(Deserialize)]
struct CdxDocument {
    #[serde(default)]
    components: Option<Vec<CdxComponent>>,
}

#[derive(Deserialize)]
struct CdxComponent {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    purl: Option<String>,
    #[serde(default)]
    licenses: Option<Vec<CdxLicenseChoice>>,
}

#[derive(Deserialize)]
struct CdxLicenseChoice {
    #[serde(default)]
    license: Option<CdxLicense>,
    #[serde(default)]
    expression: Option<String>,
}

#[derive(Deserialize)]
struct CdxLicense {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl CdxLicenseChoice {
    fn pick(&self) -> Option<String> {
        let license = self.license.as_ref();
        non_empty(license.and_then(|l| l.id.as_deref()))
            .or_else(|| non_empty(license.and_then(|l| l.name.as_deref())))
            .or_else(|| non_empty(self.expression.as_deref()))
    }
}

impl SbomParser for CycloneDxJsonParser {
    fn dialect(&self) -> SbomDialect {
        SbomDialect::CycloneDxJson
    }

    fn extract(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<RawComponent>, SbomParseError> {
        let doc: CdxDocument =
            serde_json::from_str(content).map_err(|e| SbomParseError::Parse {
                path: source_path.to_owned(),
                reason: e.to_string(),
            })?;

        let components = doc
            .components
            .unwrap_or_default()
            .into_iter()
            .map(|c| RawComponent {
                ecosystem: c.purl.as_deref().and_then(purl_type),
                license: c
                    .licenses
                    .as_ref()
                    .and_then(|l| l.first())
                    .and_then(CdxLicenseChoice::pick),
                name: c.name.unwrap_or_default(),
                version: c.version.unwrap_or_default(),
            })
            .collect();

        Ok(components)
    }
}

impl SbomParser for CycloneDxXmlParser {
    fn dialect(&self) -> SbomDialect {
        SbomDialect::CycloneDxXml
    }

    fn extract(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<RawComponent>, SbomParseError> {
        let doc = xml::parse_document(content, source_path)?;
        let ns = xml::root_namespace(&doc);

        // 첫 번째 components 컨테이너의 직계 component만 대상
        let Some(container) = doc
            .descendants()
            .find(|n| xml::is_element(n, ns, "components"))
        else {
            return Ok(Vec::new());
        };

        let components = xml::children(container, ns, "component")
            .map(|comp| {
                let license = xml::child(comp, ns, "licenses").and_then(|licenses| {
                    let first = xml::child(licenses, ns, "license");
                    first
                        .and_then(|l| xml::child_text(l, ns, "id"))
                        .or_else(|| first.and_then(|l| xml::child_text(l, ns, "name")))
                        .or_else(|| xml::child_text(licenses, ns, "expression"))
                });
                RawComponent {
                    name: xml::child_text(comp, ns, "name").unwrap_or_default(),
                    version: xml::child_text(comp, ns, "version").unwrap_or_default(),
                    ecosystem: xml::child_text(comp, ns, "purl")
                        .as_deref()
                        .and_then(purl_type),
                    license,
                }
            })
            .collect();

        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_extracts_components_in_order() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "components": [
                {"name": "left-pad", "version": "1.3.0", "purl": "pkg:npm/left-pad@1.3.0",
                 "licenses": [{"license": {"id": "MIT"}}]},
                {"name": "errors", "version": "v0.9.1", "purl": "pkg:golang/github.com/pkg/errors@v0.9.1"}
            ]
        }"#;
        let comps = CycloneDxJsonParser.extract(content, "bom.json").unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].name, "left-pad");
        assert_eq!(comps[0].ecosystem.as_deref(), Some("npm"));
        assert_eq!(comps[0].license.as_deref(), Some("MIT"));
        assert_eq!(comps[1].ecosystem.as_deref(), Some("golang"));
        assert_eq!(comps[1].license, None);
    }

    #[test]
    fn json_license_fallback_chain() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "components": [
                {"name": "a", "version": "1", "licenses": [{"license": {"name": "Custom"}}]},
                {"name": "b", "version": "1", "licenses": [{"expression": "MIT OR Apache-2.0"}]},
                {"name": "c", "version": "1", "licenses": [{"license": {}}, {"license": {"id": "MIT"}}]},
                {"name": "d", "version": "1", "licenses": []}
            ]
        }"#;
        let comps = CycloneDxJsonParser.extract(content, "bom.json").unwrap();
        assert_eq!(comps[0].license.as_deref(), Some("Custom"));
        assert_eq!(comps[1].license.as_deref(), Some("MIT OR Apache-2.0"));
        // 첫 번째 항목만 보므로 두 번째 MIT는 무시
        assert_eq!(comps[2].license, None);
        assert_eq!(comps[3].license, None);
    }

    #[test]
    fn json_without_components_is_empty() {
        let comps = CycloneDxJsonParser
            .extract(r#"{"bomFormat": "CycloneDX"}"#, "bom.json")
            .unwrap();
        assert!(comps.is_empty());
        let comps = CycloneDxJsonParser
            .extract(r#"{"bomFormat": "CycloneDX", "components": null}"#, "bom.json")
            .unwrap();
        assert!(comps.is_empty());
    }

    #[test]
    fn json_invalid_is_parse_error() {
        let err = CycloneDxJsonParser.extract("[", "bom.json").unwrap_err();
        assert!(matches!(err, SbomParseError::Parse { .. }));
    }

    #[test]
    fn xml_extracts_namespaced_components() {
        let content = r#"<?xml version="1.0"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" version="1">
  <components>
    <component type="library">
      <name>left-pad</name>
      <version>1.3.0</version>
      <purl>pkg:npm/left-pad@1.3.0</purl>
      <licenses><license><id>MIT</id></license></licenses>
    </component>
    <component type="library">
      <name>requests</name>
      <version>2.31.0</version>
      <purl>pkg:pypi/requests@2.31.0</purl>
      <licenses><license><name>Apache 2.0</name></license></licenses>
    </component>
  </components>
</bom>"#;
        let comps = CycloneDxXmlParser.extract(content, "bom.xml").unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].ecosystem.as_deref(), Some("npm"));
        assert_eq!(comps[0].license.as_deref(), Some("MIT"));
        assert_eq!(comps[1].license.as_deref(), Some("Apache 2.0"));
    }

    #[test]
    fn xml_without_components_is_empty() {
        let content = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4"/>"#;
        assert!(CycloneDxXmlParser.extract(content, "bom.xml").unwrap().is_empty());
    }
}

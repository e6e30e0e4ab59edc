//! SPDX 파서 (JSON / XML)
//!
//! 에코시스템은 `referenceType == "purl"`인 첫 외부 참조의 locator에서 얻습니다.
//! 라이선스는 `licenseConcluded`가 없거나 `NOASSERTION`이면 `licenseDeclared`를 사용합니다.

use serde::Deserialize;

use crate::dialect::SbomDialect;
use crate::ecosystem::purl_type;
use crate::error::SbomParseError;
use crate::parser::{RawComponent, SbomParser, non_empty, xml};

const NOASSERTION: &str = "NOASSERTION";
const PURL_REFERENCE_TYPE: &str = "purl";

/// SPDX JSON 파서
pub struct SpdxJsonParser;

/// SPDX XML 파서
pub struct SpdxXmlParser;

#[derive(Deserialize)]
struct SpdxDocument {
    #[serde(default)]
    packages: Option<Vec<SpdxPackage>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version_info: Option<String>,
    #[serde(default)]
    license_concluded: Option<String>,
    #[serde(default)]
    license_declared: Option<String>,
    #[serde(default)]
    external_refs: Option<Vec<SpdxExternalRef>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExternalRef {
    #[serde(default)]
    reference_type: Option<String>,
    #[serde(default)]
    reference_locator: Option<String>,
}

/// concluded → declared 순서로 라이선스를 고릅니다.
fn pick_license(concluded: Option<&str>, declared: Option<&str>) -> Option<String> {
    non_empty(concluded)
        .filter(|l| l != NOASSERTION)
        .or_else(|| non_empty(declared))
}

impl SbomParser for SpdxJsonParser {
    fn dialect(&self) -> SbomDialect {
        SbomDialect::SpdxJson
    }

    fn extract(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<RawComponent>, SbomParseError> {
        let doc: SpdxDocument =
            serde_json::from_str(content).map_err(|e| SbomParseError::Parse {
                path: source_path.to_owned(),
                reason: e.to_string(),
            })?;

        let components = doc
            .packages
            .unwrap_or_default()
            .into_iter()
            .map(|pkg| {
                let ecosystem = pkg
                    .external_refs
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .find(|r| r.reference_type.as_deref() == Some(PURL_REFERENCE_TYPE))
                    .and_then(|r| r.reference_locator.as_deref())
                    .and_then(purl_type);
                RawComponent {
                    license: pick_license(
                        pkg.license_concluded.as_deref(),
                        pkg.license_declared.as_deref(),
                    ),
                    name: pkg.name.unwrap_or_default(),
                    version: pkg.version_info.unwrap_or_default(),
                    ecosystem,
                }
            })
            .collect();

        Ok(components)
    }
}

impl SbomParser for SpdxXmlParser {
    fn dialect(&self) -> SbomDialect {
        SbomDialect::SpdxXml
    }

    fn extract(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<RawComponent>, SbomParseError> {
        let doc = xml::parse_document(content, source_path)?;
        let ns = xml::root_namespace(&doc);

        let components = doc
            .descendants()
            .filter(|n| xml::is_element(n, ns, "package"))
            .map(|pkg| {
                let ecosystem = pkg
                    .descendants()
                    .filter(|n| xml::is_element(n, ns, "externalRef"))
                    .find(|r| {
                        xml::child_text(*r, ns, "referenceType").as_deref()
                            == Some(PURL_REFERENCE_TYPE)
                    })
                    .and_then(|r| xml::child_text(r, ns, "referenceLocator"))
                    .as_deref()
                    .and_then(purl_type);
                RawComponent {
                    name: xml::child_text(pkg, ns, "name").unwrap_or_default(),
                    version: xml::child_text(pkg, ns, "versionInfo").unwrap_or_default(),
                    ecosystem,
                    license: pick_license(
                        xml::child_text(pkg, ns, "licenseConcluded").as_deref(),
                        xml::child_text(pkg, ns, "licenseDeclared").as_deref(),
                    ),
                }
            })
            .collect();

        Ok(components)
    }
}

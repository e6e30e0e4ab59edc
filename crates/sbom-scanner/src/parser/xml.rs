//! 네임스페이스 인식 XML 조회 헬퍼
//!
//! SBOM XML 문서는 대부분 기본 네임스페이스를 선언합니다.
//! 요소 이름은 루트 요소의 네임스페이스 안에서(선언이 없으면 네임스페이스 없이) 비교합니다.

use roxmltree::{Document, Node};

use crate::error::SbomParseError;

pub(crate) fn parse_document<'input>(
    content: &'input str,
    source_path: &str,
) -> Result<Document<'input>, SbomParseError> {
    Document::parse(content).map_err(|e| SbomParseError::Parse {
        path: source_path.to_owned(),
        reason: e.to_string(),
    })
}

/// 루트 요소의 네임스페이스
pub(crate) fn root_namespace<'a>(doc: &'a Document<'_>) -> Option<&'a str> {
    doc.root_element().tag_name().namespace()
}

pub(crate) fn is_element(node: &Node<'_, '_>, ns: Option<&str>, local: &str) -> bool {
    node.is_element() && node.tag_name().name() == local && node.tag_name().namespace() == ns
}

pub(crate) fn child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: Option<&str>,
    local: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_element(c, ns, local))
}

pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: Option<&'a str>,
    local: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| is_element(c, ns, local))
}

/// 자식 요소의 텍스트 (공백 제거, 비어 있으면 `None`)
pub(crate) fn child_text(node: Node<'_, '_>, ns: Option<&str>, local: &str) -> Option<String> {
    child(node, ns, local).and_then(|c| super::non_empty(c.text()))
}

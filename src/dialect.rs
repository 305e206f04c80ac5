//! Namespace-qualified element lookups over parsed XML documents.
//!
//! Every dialect this crate reads hard-codes exactly one namespace URI, so an
//! element name never needs a wildcard or namespace-ignorant match. The
//! helpers here shield the extractors from raw namespace-string handling:
//! callers name a [`Dialect`] and a local tag, nothing else. This trades
//! robustness against undeclared or alternate prefixes for predictable,
//! testable lookups.

use crate::error::Result;
use roxmltree::{Document, Node};

/// The XML dialects the extractors understand, each bound to its fixed
/// namespace URI. The URI is a constant of the dialect, not discovered from
/// the document's own prefix declarations and not configurable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dialect {
    /// Asset Administration Shell XML serialization (AAS 2.0).
    Asset,
    /// BatchML / B2MML batch-recipe documents.
    Recipe,
    /// OPC relationship parts inside a packaged AASX container.
    PackageManifest,
}

impl Dialect {
    pub fn namespace_uri(self) -> &'static str {
        match self {
            Dialect::Asset => "http://www.admin-shell.io/aas/2/0",
            Dialect::Recipe => "http://www.mesa.org/xml/B2MML",
            Dialect::PackageManifest => {
                "http://schemas.openxmlformats.org/package/2006/relationships"
            }
        }
    }
}

/// Parse one XML document.
///
/// Malformed input fails with the parser's own message; no recovery happens
/// at this layer.
pub fn parse(text: &str) -> Result<Document<'_>> {
    Ok(Document::parse(text)?)
}

/// First direct child of `parent` with the dialect-qualified tag.
pub fn find_first<'a, 'input>(
    parent: Node<'a, 'input>,
    dialect: Dialect,
    local: &str,
) -> Option<Node<'a, 'input>> {
    let namespace = dialect.namespace_uri();
    parent
        .children()
        .find(|node| node.has_tag_name((namespace, local)))
}

/// All direct children of `parent` with the dialect-qualified tag, in
/// document order.
pub fn find_children<'a, 'input>(
    parent: Node<'a, 'input>,
    dialect: Dialect,
    local: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    let namespace = dialect.namespace_uri();
    parent
        .children()
        .filter(move |node| node.has_tag_name((namespace, local)))
}

/// Lazy depth-first traversal of the whole subtree under `scope`, yielding
/// every element with the dialect-qualified tag regardless of nesting depth.
/// Each call starts a fresh iterator; traversal is bounded by document size.
pub fn find_all_descendants<'a, 'input>(
    scope: Node<'a, 'input>,
    dialect: Dialect,
    local: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    let namespace = dialect.namespace_uri();
    scope
        .descendants()
        .filter(move |node| node.has_tag_name((namespace, local)))
}

/// Trimmed text content of an element, or `None` when the element is absent
/// or has no usable text. Guards the common case of an element being present
/// but empty.
pub fn text_or_none(node: Option<Node>) -> Option<String> {
    let text = node?.text()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

//! Capability extraction from Asset Administration Shell documents.
//!
//! One parsed asset document yields one [`EquipmentDescriptor`]: the asset's
//! own identities plus every capability declared anywhere in the document.
//! Provenance stays at document level; capabilities are deliberately not
//! bound to a specific shell even when a document declares several.

use crate::dialect::{self, Dialect};
use crate::error::Result;
use roxmltree::Node;
use serde::Serialize;

/// One parsed capability element.
///
/// `semantic_iri` is the value used for cross-document equality: two records
/// describe the same capability iff their IRIs are equal as strings. A record
/// without an IRI is retained but can never equal a requirement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CapabilityRecord {
    pub id: Option<String>,
    pub semantic_iri: Option<String>,
}

/// Everything the matching engine needs to know about one asset document.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EquipmentDescriptor {
    /// Identifiers of every administration shell found in the document. Zero
    /// shells is legal.
    pub identity: Vec<String>,
    /// All capability records in document order, without deduplication;
    /// duplicates collapse implicitly at matching time via IRI equality.
    pub capabilities: Vec<CapabilityRecord>,
}

impl EquipmentDescriptor {
    /// True when any capability carries exactly this semantic IRI.
    pub fn offers(&self, iri: &str) -> bool {
        self.capabilities
            .iter()
            .any(|capability| capability.semantic_iri.as_deref() == Some(iri))
    }
}

/// Extract the equipment descriptor from one asset document.
///
/// Only a non-well-formed document errors; individual missing sub-elements
/// degrade the affected field instead of aborting the extraction.
pub fn extract_descriptor(xml: &str) -> Result<EquipmentDescriptor> {
    let doc = dialect::parse(xml)?;
    let root = doc.root();

    let mut descriptor = EquipmentDescriptor::default();
    for shell in dialect::find_all_descendants(root, Dialect::Asset, "assetAdministrationShell") {
        // A shell without a readable identification contributes no identity;
        // the document itself stays usable.
        if let Some(id) =
            dialect::text_or_none(dialect::find_first(shell, Dialect::Asset, "identification"))
        {
            descriptor.identity.push(id);
        }
    }

    for capability in dialect::find_all_descendants(root, Dialect::Asset, "capability") {
        descriptor.capabilities.push(CapabilityRecord {
            id: dialect::text_or_none(dialect::find_first(capability, Dialect::Asset, "idShort")),
            semantic_iri: semantic_iri(capability),
        });
    }

    Ok(descriptor)
}

/// First key under the capability's `semanticId` block, the canonical
/// semantic identifier. Absence at any step of the path yields `None`.
pub(crate) fn semantic_iri(capability: Node) -> Option<String> {
    let semantic = dialect::find_first(capability, Dialect::Asset, "semanticId")?;
    let keys = dialect::find_first(semantic, Dialect::Asset, "keys")?;
    dialect::text_or_none(dialect::find_first(keys, Dialect::Asset, "key"))
}

//! Requirement extraction from BatchML general-recipe documents.
//!
//! A recipe states the capabilities it needs inside `OtherInformation` blocks
//! on its process elements; only blocks tagged with the semantic-description
//! marker count. Extracted identifiers are percent-decoded into their
//! canonical IRI form so they compare exactly against asset-side IRIs.

use crate::dialect::{self, Dialect};
use crate::error::Result;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::collections::BTreeSet;

/// Marker distinguishing semantic-description blocks from other free-form
/// `OtherInformation` entries. A fixed constant of the dialect.
const SEMANTIC_DESCRIPTION_MARKER: &str = "SemanticDescription";

/// One required capability, with the declaring process element's id retained
/// for diagnostics. Only `iri` participates in matching equality.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RequirementRecord {
    pub process_id: Option<String>,
    pub iri: String,
}

/// All requirements declared by one recipe document, in document order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RecipeRequirements {
    pub records: Vec<RequirementRecord>,
}

impl RecipeRequirements {
    /// Unique requirement IRIs in deterministic order; duplicates collapse.
    pub fn iris(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.iri.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Extract the requirement set from one recipe document.
///
/// Process elements are found at any depth; a process element without a
/// qualifying semantic-description block contributes nothing and is not an
/// error.
pub fn extract_requirements(xml: &str) -> Result<RecipeRequirements> {
    let doc = dialect::parse(xml)?;

    let mut requirements = RecipeRequirements::default();
    for process in dialect::find_all_descendants(doc.root(), Dialect::Recipe, "ProcessElement") {
        let process_id =
            dialect::text_or_none(dialect::find_first(process, Dialect::Recipe, "ID"));
        for info in dialect::find_children(process, Dialect::Recipe, "OtherInformation") {
            let marker =
                dialect::text_or_none(dialect::find_first(info, Dialect::Recipe, "OtherInfoID"));
            if marker.as_deref() != Some(SEMANTIC_DESCRIPTION_MARKER) {
                continue;
            }
            let value = dialect::find_first(info, Dialect::Recipe, "OtherValue")
                .and_then(|other| dialect::find_first(other, Dialect::Recipe, "ValueString"));
            if let Some(encoded) = dialect::text_or_none(value) {
                requirements.records.push(RequirementRecord {
                    process_id: process_id.clone(),
                    iri: decode_iri(&encoded),
                });
            }
        }
    }

    Ok(requirements)
}

/// Percent-decode a URI-encoded identifier into its unescaped IRI form.
/// Byte sequences that are not valid UTF-8 degrade to replacement characters
/// rather than failing the extraction.
fn decode_iri(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(body: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><b2mml:GRecipe xmlns:b2mml="http://www.mesa.org/xml/B2MML">{body}</b2mml:GRecipe>"#
        )
    }

    fn process_element(id: &str, info_id: &str, value: &str) -> String {
        format!(
            "<b2mml:ProcessElement>\
             <b2mml:ID>{id}</b2mml:ID>\
             <b2mml:OtherInformation>\
               <b2mml:OtherInfoID>{info_id}</b2mml:OtherInfoID>\
               <b2mml:OtherValue><b2mml:ValueString>{value}</b2mml:ValueString></b2mml:OtherValue>\
             </b2mml:OtherInformation>\
             </b2mml:ProcessElement>"
        )
    }

    #[test]
    fn only_semantic_description_blocks_count() {
        let body = format!(
            "{}{}",
            process_element("Fill", "SemanticDescription", "urn:cap:fill"),
            process_element("Note", "OperatorComment", "urn:not:a:requirement"),
        );
        let requirements = extract_requirements(&recipe(&body)).expect("extraction succeeds");
        assert_eq!(requirements.records.len(), 1);
        assert_eq!(requirements.records[0].process_id.as_deref(), Some("Fill"));
        assert_eq!(requirements.records[0].iri, "urn:cap:fill");
    }

    #[test]
    fn percent_encoded_identifiers_decode_to_iris() {
        let body = process_element(
            "Fill",
            "SemanticDescription",
            "http%3A%2F%2Fexample.org%2Fcap%2Ffill",
        );
        let requirements = extract_requirements(&recipe(&body)).expect("extraction succeeds");
        assert_eq!(requirements.records[0].iri, "http://example.org/cap/fill");
    }

    #[test]
    fn duplicate_iris_collapse_in_the_requirement_set() {
        let body = format!(
            "{}{}",
            process_element("Fill1", "SemanticDescription", "urn:cap:fill"),
            process_element("Fill2", "SemanticDescription", "urn:cap:fill"),
        );
        let requirements = extract_requirements(&recipe(&body)).expect("extraction succeeds");
        assert_eq!(requirements.records.len(), 2);
        assert_eq!(requirements.iris().len(), 1);
    }

    #[test]
    fn missing_value_string_contributes_nothing() {
        let body = "<b2mml:ProcessElement>\
                    <b2mml:ID>Empty</b2mml:ID>\
                    <b2mml:OtherInformation>\
                      <b2mml:OtherInfoID>SemanticDescription</b2mml:OtherInfoID>\
                      <b2mml:OtherValue/>\
                    </b2mml:OtherInformation>\
                    </b2mml:ProcessElement>";
        let requirements = extract_requirements(&recipe(body)).expect("extraction succeeds");
        assert!(requirements.is_empty());
    }

    #[test]
    fn process_element_without_id_still_yields_its_requirement() {
        let body = "<b2mml:ProcessElement>\
                    <b2mml:OtherInformation>\
                      <b2mml:OtherInfoID>SemanticDescription</b2mml:OtherInfoID>\
                      <b2mml:OtherValue><b2mml:ValueString>urn:cap:seal</b2mml:ValueString></b2mml:OtherValue>\
                    </b2mml:OtherInformation>\
                    </b2mml:ProcessElement>";
        let requirements = extract_requirements(&recipe(body)).expect("extraction succeeds");
        assert_eq!(requirements.records.len(), 1);
        assert_eq!(requirements.records[0].process_id, None);
    }
}

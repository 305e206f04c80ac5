//! Read-only inspection view of one asset document.
//!
//! The projector serves UI-facing display, not matching: it renders identity,
//! capabilities, properties, and operations from whatever the document
//! declares. Every lookup that finds nothing yields `None`/empty, so a
//! partial document still produces a partial, best-effort report.

use crate::asset;
use crate::dialect::{self, Dialect};
use crate::error::Result;
use serde::Serialize;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EquipmentInfo {
    pub aas_id: Option<String>,
    pub asset_id: Option<String>,
    pub capabilities: Vec<CapabilityInfo>,
    pub properties: Vec<PropertyInfo>,
    pub operations: Vec<OperationInfo>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CapabilityInfo {
    pub id: Option<String>,
    pub semantic_id: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PropertyInfo {
    pub id: Option<String>,
    pub value: Option<String>,
    pub data_type: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OperationInfo {
    pub id: Option<String>,
    pub input_variables: Vec<VariableInfo>,
    pub output_variables: Vec<VariableInfo>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct VariableInfo {
    pub id: Option<String>,
    pub value: Option<String>,
}

/// Project the inspection view of one asset document.
///
/// Only a non-well-formed document errors; everything else degrades field by
/// field.
pub fn project_equipment_info(xml: &str) -> Result<EquipmentInfo> {
    let doc = dialect::parse(xml)?;
    let root = doc.root();

    let mut info = EquipmentInfo {
        aas_id: dialect::find_all_descendants(root, Dialect::Asset, "assetAdministrationShell")
            .next()
            .and_then(|shell| {
                dialect::text_or_none(dialect::find_first(shell, Dialect::Asset, "identification"))
            }),
        asset_id: dialect::find_all_descendants(root, Dialect::Asset, "asset")
            .next()
            .and_then(|asset_elem| {
                dialect::text_or_none(dialect::find_first(
                    asset_elem,
                    Dialect::Asset,
                    "identification",
                ))
            }),
        ..EquipmentInfo::default()
    };

    for capability in dialect::find_all_descendants(root, Dialect::Asset, "capability") {
        info.capabilities.push(CapabilityInfo {
            id: dialect::text_or_none(dialect::find_first(capability, Dialect::Asset, "idShort")),
            semantic_id: asset::semantic_iri(capability),
        });
    }

    for property in dialect::find_all_descendants(root, Dialect::Asset, "property") {
        info.properties.push(PropertyInfo {
            id: dialect::text_or_none(dialect::find_first(property, Dialect::Asset, "idShort")),
            value: dialect::text_or_none(dialect::find_first(property, Dialect::Asset, "value")),
            data_type: dialect::text_or_none(dialect::find_first(
                property,
                Dialect::Asset,
                "valueType",
            )),
        });
    }

    for operation in dialect::find_all_descendants(root, Dialect::Asset, "operation") {
        info.operations.push(OperationInfo {
            id: dialect::text_or_none(dialect::find_first(operation, Dialect::Asset, "idShort")),
            input_variables: variables(operation, "inputVariable"),
            output_variables: variables(operation, "outputVariable"),
        });
    }

    Ok(info)
}

fn variables(operation: roxmltree::Node, tag: &'static str) -> Vec<VariableInfo> {
    dialect::find_all_descendants(operation, Dialect::Asset, tag)
        .map(|variable| VariableInfo {
            id: dialect::text_or_none(dialect::find_first(variable, Dialect::Asset, "idShort")),
            value: dialect::text_or_none(dialect::find_first(variable, Dialect::Asset, "value")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_yields_partial_report() {
        let xml = r#"<?xml version="1.0"?>
<aas:aasenv xmlns:aas="http://www.admin-shell.io/aas/2/0">
  <aas:property><aas:idShort>MaxTemp</aas:idShort><aas:value>200</aas:value></aas:property>
  <aas:operation>
    <aas:idShort>Dose</aas:idShort>
    <aas:inputVariable><aas:idShort>amount</aas:idShort><aas:value>5</aas:value></aas:inputVariable>
    <aas:outputVariable><aas:idShort>done</aas:idShort></aas:outputVariable>
  </aas:operation>
</aas:aasenv>"#;
        let info = project_equipment_info(xml).expect("projection succeeds");
        assert_eq!(info.aas_id, None);
        assert_eq!(info.asset_id, None);
        assert!(info.capabilities.is_empty());
        assert_eq!(info.properties.len(), 1);
        assert_eq!(info.properties[0].value.as_deref(), Some("200"));
        // valueType was never declared
        assert_eq!(info.properties[0].data_type, None);
        assert_eq!(info.operations.len(), 1);
        assert_eq!(info.operations[0].input_variables.len(), 1);
        assert_eq!(
            info.operations[0].output_variables[0].id.as_deref(),
            Some("done")
        );
        assert_eq!(info.operations[0].output_variables[0].value, None);
    }

    #[test]
    fn identity_comes_from_the_first_shell_and_asset() {
        let xml = r#"<?xml version="1.0"?>
<aas:aasenv xmlns:aas="http://www.admin-shell.io/aas/2/0">
  <aas:assetAdministrationShell><aas:identification>urn:shell:a</aas:identification></aas:assetAdministrationShell>
  <aas:assetAdministrationShell><aas:identification>urn:shell:b</aas:identification></aas:assetAdministrationShell>
  <aas:asset><aas:identification>urn:asset:a</aas:identification></aas:asset>
</aas:aasenv>"#;
        let info = project_equipment_info(xml).expect("projection succeeds");
        assert_eq!(info.aas_id.as_deref(), Some("urn:shell:a"));
        assert_eq!(info.asset_id.as_deref(), Some("urn:asset:a"));
    }
}

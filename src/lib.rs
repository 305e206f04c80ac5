//! Cross-format capability extraction and matching.
//!
//! The crate reconciles two industrial XML dialects (Asset Administration
//! Shell equipment descriptions and BatchML general recipes) into one
//! canonical capability representation, and computes which required
//! capabilities are satisfiable by which equipment, with document-level
//! provenance. Packaged AASX containers are flattened back into the
//! single-document dialect before extraction. The HTTP transport, file
//! storage, and XSD compliance checking are external collaborators; the
//! pipeline here is bytes in, plain serializable records out.

pub mod asset;
pub mod dialect;
pub mod equipment_info;
pub mod error;
pub mod matching;
pub mod package;
pub mod recipe;
pub mod report_validation;

pub use asset::{CapabilityRecord, EquipmentDescriptor, extract_descriptor};
pub use dialect::Dialect;
pub use equipment_info::{
    CapabilityInfo, EquipmentInfo, OperationInfo, PropertyInfo, VariableInfo,
    project_equipment_info,
};
pub use error::{Error, Result};
pub use matching::{
    Candidate, MatchResult, RequirementMatch, match_recipe_against_documents, match_requirements,
};
pub use package::{PackageContents, extract_packaged_descriptor, read_archive, unpack, unpack_in};
pub use recipe::{RecipeRequirements, RequirementRecord, extract_requirements};
pub use report_validation::{
    ReportSchema, SchemaValidator, Verdict, equipment_info_schema_path, match_report_schema_path,
};

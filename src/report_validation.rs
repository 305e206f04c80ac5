//! Schema validation for the serialized report shapes.
//!
//! Keeps the emitted match-report and equipment-info JSON aligned with the
//! canonical schemas under `schema/`; guard-rail tests run every report shape
//! the crate produces through these checks. Document-level (XSD) compliance
//! checking stays outside the crate behind the [`SchemaValidator`] seam.

use anyhow::{Context, Result, anyhow};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pass/fail verdict plus a human-readable diagnostic, the shape relayed
/// upward by the transport layer. The core never inspects *why* a document
/// failed.
#[derive(Clone, Debug)]
pub struct Verdict {
    pub ok: bool,
    pub diagnostic: String,
}

/// External schema-validation oracle (e.g. an XSD compliance service).
pub trait SchemaValidator {
    fn validate(&self, document: &[u8], schema_ref: &str) -> Verdict;
}

/// Compiled JSON Schema for one report shape.
pub struct ReportSchema {
    compiled: JSONSchema,
    // The compiled validator borrows the schema payload; the Arc pins it for
    // the validator's lifetime.
    _raw: Arc<Value>,
}

impl ReportSchema {
    pub fn load(path: &Path) -> Result<Self> {
        let schema: Value = serde_json::from_reader(BufReader::new(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        ))
        .with_context(|| format!("parsing schema {}", path.display()))?;

        let raw = Arc::new(schema);
        let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
        let compiled = JSONSchema::compile(raw_static)
            .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;
        Ok(Self {
            compiled,
            _raw: raw,
        })
    }

    /// Violations for one serialized report; empty means conformant. Returns
    /// a list rather than short-circuiting so callers can surface every
    /// problem at once.
    pub fn violations(&self, report: &Value) -> Vec<String> {
        match self.compiled.validate(report) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|err| err.to_string()).collect(),
        }
    }
}

/// Canonical schema for serialized [`crate::MatchResult`] values.
pub fn match_report_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/match_report.schema.json")
}

/// Canonical schema for serialized [`crate::EquipmentInfo`] values.
pub fn equipment_info_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/equipment_info.schema.json")
}

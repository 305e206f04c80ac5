//! Matching engine: which equipment descriptions can realize which required
//! capabilities.
//!
//! A requirement is satisfiable by a candidate iff the candidate's descriptor
//! contains a capability whose semantic IRI equals the requirement exactly.
//! Every satisfying candidate is reported, not just the first; a requirement
//! nobody offers lands in `unsatisfied`. Matching is total: it never fails
//! structurally over two valid input sets.

use crate::asset::{self, EquipmentDescriptor};
use crate::error::Result;
use crate::recipe;
use serde::Serialize;
use std::collections::BTreeSet;

/// One candidate equipment document offered to the engine.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Identity hint used in reports when the document declares no shell
    /// identity of its own (typically the uploaded file or archive member
    /// name).
    pub label: String,
    pub descriptor: EquipmentDescriptor,
}

/// One satisfied requirement and every equipment identity able to realize it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RequirementMatch {
    pub requirement_iri: String,
    pub satisfied_by: Vec<String>,
}

/// Outcome of one matching invocation; immutable after construction.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MatchResult {
    pub satisfied: Vec<RequirementMatch>,
    pub unsatisfied: BTreeSet<String>,
}

impl MatchResult {
    pub fn fully_satisfied(&self) -> bool {
        self.unsatisfied.is_empty()
    }
}

/// Match a requirement set against an ordered sequence of candidates.
///
/// Requirements are visited in the set's deterministic order and candidates
/// in input order, so the same inputs always produce the same report. The
/// scan is linear per requirement; corpus sizes are dozens of capabilities,
/// so clarity wins over an IRI lookup table.
pub fn match_requirements(
    requirements: &BTreeSet<String>,
    candidates: &[Candidate],
) -> MatchResult {
    let mut result = MatchResult::default();
    for requirement in requirements {
        let mut satisfied_by = Vec::new();
        for candidate in candidates {
            if !candidate.descriptor.offers(requirement) {
                continue;
            }
            if candidate.descriptor.identity.is_empty() {
                satisfied_by.push(candidate.label.clone());
            } else {
                satisfied_by.extend(candidate.descriptor.identity.iter().cloned());
            }
        }
        if satisfied_by.is_empty() {
            result.unsatisfied.insert(requirement.clone());
        } else {
            result.satisfied.push(RequirementMatch {
                requirement_iri: requirement.clone(),
                satisfied_by,
            });
        }
    }
    result
}

/// Parse a recipe and a set of labelled asset documents, then run the engine.
/// The one-call path used by the CLI.
pub fn match_recipe_against_documents(
    recipe_xml: &str,
    documents: &[(String, String)],
) -> Result<MatchResult> {
    let requirements = recipe::extract_requirements(recipe_xml)?.iris();
    let mut candidates = Vec::with_capacity(documents.len());
    for (label, xml) in documents {
        candidates.push(Candidate {
            label: label.clone(),
            descriptor: asset::extract_descriptor(xml)?,
        });
    }
    Ok(match_requirements(&requirements, &candidates))
}

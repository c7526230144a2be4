//! Key and normal-form analysis record, and the decomposition summary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normal_form::{NormalFormReport, Violation};
use crate::schema::{AttrSet, Schema};

/// Attributes, candidate keys, and normal-form violations of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAnalysis {
    pub attributes: Vec<String>,
    pub candidate_keys: Vec<Vec<String>>,
    pub violations_2nf: Vec<Violation>,
    pub violations_3nf: Vec<Violation>,
}

impl KeyAnalysis {
    pub fn new(schema: &Schema, keys: &[AttrSet], report: NormalFormReport) -> Self {
        Self {
            attributes: schema.names().to_vec(),
            candidate_keys: keys.iter().map(|k| schema.names_of(k)).collect(),
            violations_2nf: report.violations_2nf,
            violations_3nf: report.violations_3nf,
        }
    }

    /// Resolve the stored keys against `schema`.
    pub fn keys(&self, schema: &Schema) -> Result<Vec<AttrSet>> {
        self.candidate_keys
            .iter()
            .map(|key| schema.resolve(key, "candidate key"))
            .collect()
    }
}

/// Per-relation entry of the decomposition summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSummary {
    pub table: String,
    pub attributes: Vec<String>,
    pub num_rows: usize,
    pub csv: PathBuf,
}

/// What was written for a decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionSummary {
    pub relations: Vec<RelationSummary>,
    pub candidate_keys: Vec<Vec<String>>,
}

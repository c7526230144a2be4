//! Main Normalizer struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::discovery::{DiscoveryConfig, FdDiscoverer};
use crate::error::{Result, TabnormError};
use crate::input::{CleaningConfig, DataTable, Parser, ParserConfig, SourceMetadata, clean_table};
use crate::keys::{KeyConfig, find_keys};
use crate::normal_form::analyze;
use crate::output::KeyAnalysis;
use crate::schema::{FdSet, Schema};
use crate::synthesis::{Decomposition, synthesize};

/// Configuration for an end-to-end normalization run.
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Cleaning applied before discovery.
    pub cleaning: CleaningConfig,
    /// FD discovery bounds and sampling.
    pub discovery: DiscoveryConfig,
    /// Candidate key bounds and known keys.
    pub keys: KeyConfig,
}

/// Result of normalizing one table.
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    /// Metadata about the source file, when the input came from disk.
    pub source: Option<SourceMetadata>,
    /// The cleaned table the engine ran on.
    pub table: DataTable,
    /// Attribute universe of the cleaned table.
    pub schema: Schema,
    /// Discovered dependencies.
    pub fds: FdSet,
    /// Keys and normal-form violations.
    pub analysis: KeyAnalysis,
    /// Synthesized 3NF relations.
    pub decomposition: Decomposition,
    /// Summary counts.
    pub summary: NormalizationSummary,
}

/// Summary of a normalization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub dependency_count: usize,
    pub determinant_count: usize,
    pub candidate_key_count: usize,
    pub violations_2nf: usize,
    pub violations_3nf: usize,
    pub relation_count: usize,
    /// Human-readable recommendation.
    pub recommendation: String,
}

/// The main normalization engine.
pub struct Normalizer {
    config: NormalizerConfig,
    parser: Parser,
    discoverer: FdDiscoverer,
}

impl Normalizer {
    /// Create a normalizer with default configuration.
    pub fn new() -> Self {
        Self::with_config(NormalizerConfig::default())
    }

    /// Create a normalizer with custom configuration.
    pub fn with_config(config: NormalizerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let discoverer = FdDiscoverer::with_config(config.discovery.clone());
        Self {
            config,
            parser,
            discoverer,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Parse, clean, and normalize a data file.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<NormalizationResult> {
        let (table, source) = self.parser.parse_file(path)?;
        let mut result = self.run_table(&table)?;
        result.source = Some(source);
        Ok(result)
    }

    /// Clean and normalize an in-memory table.
    pub fn run_table(&self, raw: &DataTable) -> Result<NormalizationResult> {
        let table = clean_table(raw, &self.config.cleaning);
        if table.row_count() == 0 {
            return Err(TabnormError::EmptyData(
                "No data rows left after cleaning".to_string(),
            ));
        }
        let schema = Schema::from_table(&table)?;

        let fds = self.discoverer.discover(&table)?;
        let keys = find_keys(&schema, &fds, &self.config.keys)?;
        let report = analyze(&schema, &keys, &fds);
        let decomposition = synthesize(&table, &schema, &fds, &keys);
        let analysis = KeyAnalysis::new(&schema, &keys, report);

        let summary = summarize(&table, &fds, &analysis, &decomposition);
        info!(
            relations = summary.relation_count,
            keys = summary.candidate_key_count,
            "Normalization finished"
        );

        Ok(NormalizationResult {
            source: None,
            table,
            schema,
            fds,
            analysis,
            decomposition,
            summary,
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(
    table: &DataTable,
    fds: &FdSet,
    analysis: &KeyAnalysis,
    decomposition: &Decomposition,
) -> NormalizationSummary {
    let mut summary = NormalizationSummary {
        total_rows: table.row_count(),
        total_columns: table.column_count(),
        dependency_count: fds.len(),
        determinant_count: fds.group_count(),
        candidate_key_count: analysis.candidate_keys.len(),
        violations_2nf: analysis.violations_2nf.len(),
        violations_3nf: analysis.violations_3nf.len(),
        relation_count: decomposition.relations.len(),
        recommendation: String::new(),
    };
    summary.recommendation = recommend(&summary);
    summary
}

/// Generate a recommendation based on the analysis.
fn recommend(summary: &NormalizationSummary) -> String {
    if summary.candidate_key_count == 0 {
        "No candidate key found within the search bound. Increase the key size \
         or supply known keys before trusting the decomposition."
            .to_string()
    } else if summary.violations_3nf == 0 {
        "Table is already in 3NF with respect to the discovered dependencies.".to_string()
    } else if summary.violations_2nf > 0 {
        format!(
            "Split into {} relations to remove {} partial and {} transitive dependencies.",
            summary.relation_count, summary.violations_2nf, summary.violations_3nf
        )
    } else {
        format!(
            "Split into {} relations to remove {} transitive dependencies.",
            summary.relation_count, summary.violations_3nf
        )
    }
}

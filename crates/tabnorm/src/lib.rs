//! tabnorm: relational schema inference for denormalized tabular datasets.
//!
//! tabnorm takes a spreadsheet-style export and reverse-engineers a schema
//! from it: it discovers functional dependencies between columns, derives
//! candidate keys, reports 2NF and 3NF violations, and synthesizes a set of
//! 3NF relations together with their projected rows.
//!
//! # Pipeline
//!
//! - **Discovery**: minimal dependencies up to a bounded determinant size,
//!   optionally on a seeded row sample
//! - **Keys**: minimal attribute sets whose closure is every attribute
//! - **Analysis**: partial and transitive dependency detection
//! - **Synthesis**: one relation per determinant, plus a key relation
//!
//! Search cost grows combinatorially with the determinant and key bounds.
//! There is no internal timeout; keep the bounds small on wide tables.
//!
//! # Example
//!
//! ```no_run
//! use tabnorm::Normalizer;
//!
//! let result = Normalizer::new().run("orders.csv").unwrap();
//!
//! println!("Dependencies: {}", result.fds.len());
//! println!("Keys: {:?}", result.analysis.candidate_keys);
//! result.decomposition.write("out/").unwrap();
//! ```

pub mod closure;
pub mod combinations;
pub mod discovery;
pub mod error;
pub mod input;
pub mod keys;
pub mod normal_form;
pub mod output;
pub mod schema;
pub mod synthesis;

mod normalizer;

pub use crate::normalizer::{
    NormalizationResult, NormalizationSummary, Normalizer, NormalizerConfig,
};
pub use closure::{ClosureCache, closure};
pub use discovery::{DiscoveryConfig, FdDiscoverer, is_fd};
pub use error::{Result, TabnormError};
pub use input::{CleaningConfig, DataTable, Parser, ParserConfig, SourceMetadata};
pub use keys::{KeyConfig, find_keys, prime_attributes};
pub use normal_form::{NormalFormReport, Violation, analyze};
pub use output::{DecompositionSummary, KeyAnalysis, RelationSummary};
pub use schema::{AttrSet, FdSet, FunctionalDependency, Schema};
pub use synthesis::{Decomposition, Relation, synthesize};

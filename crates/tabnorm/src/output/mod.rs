//! Serializable records handed to packaging and storage layers.

mod analysis;
mod persistence;

pub use analysis::{DecompositionSummary, KeyAnalysis, RelationSummary};
pub use persistence::{DECOMPOSITION_SUMMARY_FILE, read_fds, write_fds, write_table};

//! Minimal functional dependency discovery.
//!
//! For every attribute `R`, candidate determinants are enumerated by
//! ascending size up to `max_lhs_size`. A candidate is skipped when an
//! already accepted determinant of `R` is a subset of it, so only minimal
//! left-hand sides are ever tested. Each test partitions the rows by their
//! left-hand values and checks that every partition agrees on `R`.
//!
//! The search is exponential in `max_lhs_size`; 2 or 3 is the practical
//! ceiling on wide tables. Large tables can be searched on a seeded row
//! sample, which may miss dependencies that only a full scan would refute
//! or confirm, so results on sampled input are best effort.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::combinations::Combinations;
use crate::error::{Result, TabnormError};
use crate::input::DataTable;
use crate::schema::{AttrSet, FdSet, FunctionalDependency, Schema};

/// Seed used for row sampling unless configured otherwise.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for FD discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Largest determinant size to search.
    pub max_lhs_size: usize,
    /// Search a row sample of this size instead of the whole table.
    pub sample_size: Option<usize>,
    /// Seed for the row sample.
    pub seed: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_lhs_size: 2,
            sample_size: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl DiscoveryConfig {
    pub fn with_max_lhs_size(mut self, max_lhs_size: usize) -> Self {
        self.max_lhs_size = max_lhs_size;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Discovers minimal, non-trivial functional dependencies in a table.
pub struct FdDiscoverer {
    config: DiscoveryConfig,
}

impl FdDiscoverer {
    /// Create a discoverer with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }

    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover the FD set of `table`.
    pub fn discover(&self, table: &DataTable) -> Result<FdSet> {
        if self.config.max_lhs_size == 0 {
            return Err(TabnormError::InvalidBound {
                name: "max_lhs_size",
                value: 0,
            });
        }
        if self.config.sample_size == Some(0) {
            return Err(TabnormError::InvalidBound {
                name: "sample_size",
                value: 0,
            });
        }
        if table.column_count() == 0 {
            return Err(TabnormError::EmptyData("No columns found".to_string()));
        }
        if table.row_count() == 0 {
            return Err(TabnormError::EmptyData("No data rows found".to_string()));
        }
        let schema = Schema::from_table(table)?;

        let sampled;
        let table = match self.config.sample_size {
            Some(n) if n < table.row_count() => {
                warn!(
                    sample = n,
                    rows = table.row_count(),
                    seed = self.config.seed,
                    "Discovering dependencies on a row sample; results are best effort"
                );
                sampled = sample_rows(table, n, self.config.seed);
                &sampled
            }
            _ => table,
        };

        let fds = search(table, &schema, self.config.max_lhs_size);
        info!(
            dependencies = fds.len(),
            determinants = fds.group_count(),
            max_lhs_size = self.config.max_lhs_size,
            "Discovered functional dependencies"
        );
        Ok(fds)
    }
}

impl Default for FdDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

fn search(table: &DataTable, schema: &Schema, max_lhs_size: usize) -> FdSet {
    let mut accepted: Vec<FunctionalDependency> = Vec::new();

    for rhs in 0..schema.len() {
        let candidates: Vec<usize> = (0..schema.len()).filter(|&c| c != rhs).collect();
        let mut minimal: Vec<AttrSet> = Vec::new();

        for size in 1..=max_lhs_size.min(candidates.len()) {
            for lhs in Combinations::new(candidates.clone(), size) {
                if minimal.iter().any(|m| m.is_subset(&lhs)) {
                    continue;
                }
                if is_fd(table, &lhs, rhs) {
                    debug!(lhs = %schema.key_of(&lhs), rhs = schema.name(rhs), "Found FD");
                    minimal.push(lhs.clone());
                    accepted.push(FunctionalDependency::new(lhs, rhs));
                }
            }
        }
    }

    // Candidates never include the RHS, but keep the invariant explicit.
    accepted.retain(|fd| !fd.is_trivial());
    FdSet::from_dependencies(accepted)
}

/// Whether `lhs -> rhs` holds: rows that agree on `lhs` agree on `rhs`.
///
/// Empty strings are ordinary values and take part in the comparison.
pub fn is_fd(table: &DataTable, lhs: &AttrSet, rhs: usize) -> bool {
    let columns: Vec<usize> = lhs.iter().collect();
    let mut seen: HashMap<Vec<&str>, &str> = HashMap::with_capacity(table.row_count());
    for row in &table.rows {
        let key: Vec<&str> = columns.iter().map(|&c| cell(row, c)).collect();
        let value = cell(row, rhs);
        match seen.get(&key) {
            Some(&existing) if existing != value => return false,
            Some(_) => {}
            None => {
                seen.insert(key, value);
            }
        }
    }
    true
}

/// Re-check every dependency in `fds` against `table`, returning the ones
/// that do not hold.
pub fn violated_dependencies(table: &DataTable, fds: &FdSet) -> Vec<FunctionalDependency> {
    fds.dependencies()
        .filter(|fd| !is_fd(table, &fd.lhs, fd.rhs))
        .collect()
}

/// Deterministically pick `n` distinct rows using a seeded shuffle.
pub fn sample_rows(table: &DataTable, n: usize, seed: u64) -> DataTable {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut indices: Vec<usize> = (0..table.row_count()).collect();
    let n = n.min(indices.len());
    // Partial Fisher-Yates: the first n slots end up uniformly sampled.
    for i in 0..n {
        let j = rng.usize(i..indices.len());
        indices.swap(i, j);
    }
    indices.truncate(n);
    table.select_rows(&indices)
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

//! Second and third normal form violation detection.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::keys::prime_attributes;
use crate::schema::{AttrSet, FdSet, Schema};

/// A violating dependency, serialized as `[lhs_key, rhs]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation(pub String, pub String);

impl Violation {
    /// Canonical key of the determinant, e.g. `"order_id,product_id"`.
    pub fn lhs(&self) -> &str {
        &self.0
    }

    pub fn rhs(&self) -> &str {
        &self.1
    }
}

/// Partial (2NF) and transitive (3NF) dependencies of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalFormReport {
    /// One entry per (dependency, key) pair where the determinant is a
    /// proper subset of the key and the dependent is not prime.
    pub violations_2nf: Vec<Violation>,
    /// Dependencies whose determinant is not a superkey and whose dependent
    /// is not prime.
    pub violations_3nf: Vec<Violation>,
}

impl NormalFormReport {
    pub fn is_2nf(&self) -> bool {
        self.violations_2nf.is_empty()
    }

    pub fn is_3nf(&self) -> bool {
        self.violations_3nf.is_empty()
    }
}

/// Classify every dependency in `fds` against `keys`.
///
/// With no keys, every dependency is a 3NF violation and none is a 2NF
/// violation.
pub fn analyze(schema: &Schema, keys: &[AttrSet], fds: &FdSet) -> NormalFormReport {
    let prime = prime_attributes(keys);
    let mut report = NormalFormReport::default();

    for fd in fds.dependencies() {
        if prime.contains(fd.rhs) {
            continue;
        }
        let violation = || Violation(schema.key_of(&fd.lhs), schema.name(fd.rhs).to_string());

        for key in keys {
            if fd.lhs.is_strict_subset(key) {
                report.violations_2nf.push(violation());
            }
        }
        if !keys.iter().any(|key| fd.lhs.is_superset(key)) {
            report.violations_3nf.push(violation());
        }
    }

    info!(
        violations_2nf = report.violations_2nf.len(),
        violations_3nf = report.violations_3nf.len(),
        "Normal form analysis finished"
    );
    report
}

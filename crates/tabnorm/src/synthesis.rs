//! 3NF relation synthesis.
//!
//! One relation per determinant (`lhs ∪ rhs`), a key relation when the first
//! candidate key is not already covered, then duplicate and subset relations
//! are removed. Structure is decided on attribute sets; rows are copied only
//! for the relations that survive.
//!
//! This does not verify that the decomposition is a lossless join. It only
//! guarantees that every dependency fits inside some relation and that one
//! relation holds a full key whenever a key was found.

use tracing::{debug, info};

use crate::input::DataTable;
use crate::schema::{AttrSet, FdSet, Schema};

/// One output table of a decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Generated name, `table_1`, `table_2`, ...
    pub name: String,
    /// Attribute names sorted alphabetically.
    pub attributes: Vec<String>,
    /// Distinct rows of the source projected onto the attributes, columns in
    /// source order.
    pub data: DataTable,
}

impl Relation {
    pub fn row_count(&self) -> usize {
        self.data.row_count()
    }
}

/// The synthesized relations plus the keys they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub relations: Vec<Relation>,
    /// Candidate keys, by attribute name, for traceability.
    pub candidate_keys: Vec<Vec<String>>,
}

/// Decide the attribute sets of the output relations.
pub fn plan_relations(fds: &FdSet, keys: &[AttrSet]) -> Vec<AttrSet> {
    let mut relations: Vec<AttrSet> = fds.groups().map(|(lhs, rhs)| lhs.union(rhs)).collect();

    // Only the first key is checked.
    if let Some(first) = keys.first() {
        if !relations.iter().any(|rel| first.is_subset(rel)) {
            debug!(key = ?first, "Adding key relation");
            relations.push(first.clone());
        }
    }

    remove_redundant(relations)
}

/// Drop exact duplicates, then relations strictly contained in another.
pub fn remove_redundant(relations: Vec<AttrSet>) -> Vec<AttrSet> {
    let mut unique: Vec<AttrSet> = Vec::with_capacity(relations.len());
    for rel in relations {
        if !unique.contains(&rel) {
            unique.push(rel);
        }
    }

    unique
        .iter()
        .filter(|rel| !unique.iter().any(|other| rel.is_strict_subset(other)))
        .cloned()
        .collect()
}

/// Synthesize and materialize the decomposition of `table`.
pub fn synthesize(table: &DataTable, schema: &Schema, fds: &FdSet, keys: &[AttrSet]) -> Decomposition {
    let relations: Vec<Relation> = plan_relations(fds, keys)
        .iter()
        .enumerate()
        .map(|(i, attrs)| {
            let columns: Vec<usize> = attrs.iter().collect();
            let mut attributes = schema.names_of(attrs);
            attributes.sort();
            Relation {
                name: format!("table_{}", i + 1),
                attributes,
                data: table.project_distinct(&columns),
            }
        })
        .collect();

    info!(
        relations = relations.len(),
        rows = relations.iter().map(Relation::row_count).sum::<usize>(),
        "Synthesized 3NF relations"
    );

    Decomposition {
        relations,
        candidate_keys: keys.iter().map(|k| schema.names_of(k)).collect(),
    }
}

//! Attribute closure under a set of functional dependencies.

use std::collections::HashMap;

use crate::schema::{AttrSet, FdSet};

/// Compute the closure of `attrs` under `fds`.
///
/// Repeatedly adds the right side of every dependency whose left side is
/// already contained in the accumulated set, until a full pass adds nothing.
/// The result always contains `attrs`.
pub fn closure(attrs: &AttrSet, fds: &FdSet) -> AttrSet {
    let mut result = attrs.clone();
    let mut changed = true;
    while changed {
        changed = false;
        for (lhs, rhs) in fds.groups() {
            if lhs.is_subset(&result) && result.union_with(rhs) {
                changed = true;
            }
        }
    }
    result
}

/// Memoized closures for a single FD set.
///
/// A cache must only ever be used with the FD set it was first queried
/// against; entries are keyed by the input set alone.
#[derive(Debug, Default)]
pub struct ClosureCache {
    memo: HashMap<AttrSet, AttrSet>,
    hits: usize,
}

impl ClosureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closure of `attrs`, computed once per distinct input set.
    pub fn closure(&mut self, attrs: &AttrSet, fds: &FdSet) -> &AttrSet {
        if self.memo.contains_key(attrs) {
            self.hits += 1;
        }
        self.memo
            .entry(attrs.clone())
            .or_insert_with(|| closure(attrs, fds))
    }

    /// Number of cached input sets.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

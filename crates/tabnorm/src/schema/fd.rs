//! Functional dependencies and the grouped FD set.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;

use super::attrs::AttrSet;
use super::table::Schema;

/// A single dependency `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionalDependency {
    pub lhs: AttrSet,
    pub rhs: usize,
}

impl FunctionalDependency {
    pub fn new(lhs: AttrSet, rhs: usize) -> Self {
        Self { lhs, rhs }
    }

    /// A dependency is trivial when its right side is part of its left side.
    pub fn is_trivial(&self) -> bool {
        self.lhs.contains(self.rhs)
    }
}

/// Dependencies grouped by determinant: `lhs -> {rhs, ..}`.
///
/// Groups keep the order in which their determinant was first inserted, so
/// iteration and serialization are reproducible. Trivial dependencies are
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FdSet {
    groups: IndexMap<AttrSet, AttrSet>,
}

/// Serialized shape of an [`FdSet`]: canonical LHS key to RHS names.
pub type NamedFds = IndexMap<String, Vec<String>>;

impl FdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a list of dependencies, dropping trivial ones.
    pub fn from_dependencies<I>(fds: I) -> Self
    where
        I: IntoIterator<Item = FunctionalDependency>,
    {
        let mut set = Self::new();
        for fd in fds {
            set.insert(fd);
        }
        set
    }

    /// Add a dependency. Returns `false` if it was trivial or already present.
    pub fn insert(&mut self, fd: FunctionalDependency) -> bool {
        if fd.is_trivial() {
            return false;
        }
        self.groups
            .entry(fd.lhs)
            .or_default()
            .insert(fd.rhs)
    }

    /// Number of single-attribute dependencies.
    pub fn len(&self) -> usize {
        self.groups.values().map(AttrSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct determinants.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Iterate over `(lhs, rhs-set)` groups.
    pub fn groups(&self) -> impl Iterator<Item = (&AttrSet, &AttrSet)> {
        self.groups.iter()
    }

    /// Iterate over single dependencies, group by group.
    pub fn dependencies(&self) -> impl Iterator<Item = FunctionalDependency> + '_ {
        self.groups
            .iter()
            .flat_map(|(lhs, rhs)| rhs.iter().map(|r| FunctionalDependency::new(lhs.clone(), r)))
    }

    /// Right-hand sides determined by exactly `lhs`.
    pub fn rhs_of(&self, lhs: &AttrSet) -> Option<&AttrSet> {
        self.groups.get(lhs)
    }

    /// Render with attribute names, e.g. `{"a,b": ["c"]}`.
    pub fn to_named(&self, schema: &Schema) -> NamedFds {
        self.groups
            .iter()
            .map(|(lhs, rhs)| (schema.key_of(lhs), schema.names_of(rhs)))
            .collect()
    }

    /// Rebuild from the named form, failing on attributes outside `schema`.
    pub fn from_named(schema: &Schema, named: &NamedFds) -> Result<Self> {
        let mut set = Self::new();
        for (lhs_key, rhs_names) in named {
            let lhs = schema.parse_key(lhs_key, "functional dependency")?;
            for rhs in schema.resolve(rhs_names, "functional dependency")?.iter() {
                let fd = FunctionalDependency::new(lhs.clone(), rhs);
                if fd.is_trivial() {
                    debug!(lhs = %lhs_key, rhs = schema.name(rhs), "Dropping trivial dependency");
                    continue;
                }
                set.insert(fd);
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> AttrSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_trivial_dependencies_dropped() {
        let mut fds = FdSet::new();
        assert!(!fds.insert(FunctionalDependency::new(set(&[0, 1]), 1)));
        assert!(fds.is_empty());
        assert!(fds.insert(FunctionalDependency::new(set(&[0]), 1)));
        assert!(!fds.insert(FunctionalDependency::new(set(&[0]), 1)));
        assert_eq!(fds.len(), 1);
    }

    #[test]
    fn test_grouping_preserves_first_insertion_order() {
        let fds = FdSet::from_dependencies([
            FunctionalDependency::new(set(&[2]), 0),
            FunctionalDependency::new(set(&[1]), 0),
            FunctionalDependency::new(set(&[2]), 3),
        ]);
        let lhs: Vec<_> = fds.groups().map(|(l, _)| l.clone()).collect();
        assert_eq!(lhs, vec![set(&[2]), set(&[1])]);
        assert_eq!(fds.group_count(), 2);
        assert_eq!(fds.len(), 3);
        assert_eq!(fds.rhs_of(&set(&[2])), Some(&set(&[0, 3])));
    }

    #[test]
    fn test_named_round_trip() {
        let schema = Schema::new(["a", "b", "c", "d"]).unwrap();
        let fds = FdSet::from_dependencies([
            FunctionalDependency::new(set(&[0, 1]), 2),
            FunctionalDependency::new(set(&[0, 1]), 3),
            FunctionalDependency::new(set(&[3]), 2),
        ]);
        let named = fds.to_named(&schema);
        assert_eq!(named["a,b"], vec!["c", "d"]);
        assert_eq!(named["d"], vec!["c"]);
        assert_eq!(FdSet::from_named(&schema, &named).unwrap(), fds);
    }

    #[test]
    fn test_from_named_rejects_unknown() {
        let schema = Schema::new(["a", "b"]).unwrap();
        let mut named = NamedFds::new();
        named.insert("a".to_string(), vec!["z".to_string()]);
        assert!(FdSet::from_named(&schema, &named).is_err());
    }
}

//! Property-based tests for the normalization engine.
//!
//! These tests use proptest to generate small random tables and dependency
//! sets, and check that discovery, closure, key search, normal-form analysis
//! and synthesis keep their invariants on all of them.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p tabnorm --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p tabnorm --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use tabnorm::discovery::{sample_rows, violated_dependencies};
use tabnorm::input::{deduplicate_names, snake_case};
use tabnorm::{
    AttrSet, DataTable, DiscoveryConfig, FdDiscoverer, FdSet, FunctionalDependency, KeyConfig,
    Schema, analyze, closure, find_keys, is_fd, prime_attributes, synthesize,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Small tables over a tiny alphabet, so that dependencies occur often.
fn table_strategy() -> impl Strategy<Value = DataTable> {
    (1usize..=5, 1usize..=12).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(vec!["a", "b", "c", ""]), cols),
            rows,
        )
        .prop_map(move |rows| {
            let headers: Vec<String> = (0..cols).map(|i| format!("c{i}")).collect();
            DataTable::from_records(headers, rows)
        })
    })
}

/// Random dependency sets over `n` attributes, paired with `n`.
fn fd_strategy() -> impl Strategy<Value = (usize, FdSet)> {
    (2usize..=6).prop_flat_map(|n| {
        prop::collection::vec((1u32..(1u32 << n), 0..n), 0..8).prop_map(move |raw| {
            let fds = FdSet::from_dependencies(raw.into_iter().map(|(mask, rhs)| {
                let lhs: AttrSet = (0..n).filter(|i| mask & (1 << i) != 0).collect();
                FunctionalDependency::new(lhs, rhs)
            }));
            (n, fds)
        })
    })
}

fn attr_subset(n: usize) -> impl Strategy<Value = AttrSet> {
    prop::collection::vec(any::<bool>(), n)
        .prop_map(|bits| bits.iter().enumerate().filter(|(_, b)| **b).map(|(i, _)| i).collect())
}

fn schema_of(n: usize) -> Schema {
    Schema::new((0..n).map(|i| format!("c{i}"))).unwrap()
}

// =============================================================================
// Closure Properties
// =============================================================================

mod closure_tests {
    use super::*;

    proptest! {
        /// The closure contains its input and is a fixpoint.
        #[test]
        fn closure_is_extensive_and_idempotent(
            (fds, attrs) in fd_strategy().prop_flat_map(|(n, fds)| (Just(fds), attr_subset(n)))
        ) {
            let once = closure(&attrs, &fds);
            prop_assert!(attrs.is_subset(&once));
            prop_assert_eq!(closure(&once, &fds), once);
        }

        /// Growing the input never shrinks the closure.
        #[test]
        fn closure_is_monotone(
            (fds, a, b) in fd_strategy()
                .prop_flat_map(|(n, fds)| (Just(fds), attr_subset(n), attr_subset(n)))
        ) {
            let union = a.union(&b);
            prop_assert!(closure(&a, &fds).is_subset(&closure(&union, &fds)));
        }

        /// No dependency can fire on a closed set.
        #[test]
        fn closure_respects_every_dependency(
            (fds, attrs) in fd_strategy().prop_flat_map(|(n, fds)| (Just(fds), attr_subset(n)))
        ) {
            let closed = closure(&attrs, &fds);
            for fd in fds.dependencies() {
                if fd.lhs.is_subset(&closed) {
                    prop_assert!(closed.contains(fd.rhs));
                }
            }
        }
    }
}

// =============================================================================
// Discovery Properties
// =============================================================================

mod discovery_tests {
    use super::*;

    proptest! {
        /// Every discovered dependency holds on the data it came from.
        #[test]
        fn discovered_dependencies_hold(table in table_strategy()) {
            let fds = FdDiscoverer::new().discover(&table).unwrap();
            prop_assert!(violated_dependencies(&table, &fds).is_empty());
        }

        /// Discovered determinants are minimal and non-trivial.
        #[test]
        fn discovered_determinants_are_minimal(table in table_strategy()) {
            let fds = FdDiscoverer::new().discover(&table).unwrap();
            for fd in fds.dependencies() {
                prop_assert!(!fd.lhs.contains(fd.rhs));
                prop_assert!(fd.lhs.len() <= 2);
                for removed in fd.lhs.iter() {
                    let mut smaller = fd.lhs.clone();
                    smaller.remove(removed);
                    if !smaller.is_empty() {
                        prop_assert!(!is_fd(&table, &smaller, fd.rhs));
                    }
                }
            }
        }

        /// Every single-attribute dependency that holds is found.
        #[test]
        fn single_attribute_dependencies_are_complete(table in table_strategy()) {
            let fds = FdDiscoverer::new().discover(&table).unwrap();
            let n = table.column_count();
            for lhs in 0..n {
                for rhs in (0..n).filter(|&r| r != lhs) {
                    let single = AttrSet::singleton(lhs);
                    if is_fd(&table, &single, rhs) {
                        prop_assert!(fds.rhs_of(&single).is_some_and(|r| r.contains(rhs)));
                    }
                }
            }
        }

        /// Sampling with the same seed gives the same rows.
        #[test]
        fn sampling_is_deterministic(table in table_strategy(), n in 1usize..16, seed in any::<u64>()) {
            let first = sample_rows(&table, n, seed);
            let second = sample_rows(&table, n, seed);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.row_count(), n.min(table.row_count()));
            for row in &first.rows {
                prop_assert!(table.rows.contains(row));
            }

            let config = DiscoveryConfig::default().with_sample_size(n).with_seed(seed);
            let a = FdDiscoverer::with_config(config.clone()).discover(&table).unwrap();
            let b = FdDiscoverer::with_config(config).discover(&table).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Named form resolves back to the same dependency set.
        #[test]
        fn named_form_resolves_back(table in table_strategy()) {
            let schema = Schema::from_table(&table).unwrap();
            let fds = FdDiscoverer::new().discover(&table).unwrap();
            let named = fds.to_named(&schema);
            prop_assert_eq!(FdSet::from_named(&schema, &named).unwrap(), fds);
        }
    }
}

// =============================================================================
// Key and Normal Form Properties
// =============================================================================

mod key_tests {
    use super::*;

    proptest! {
        /// Keys determine everything, are minimal, and never nest.
        #[test]
        fn keys_are_minimal_superkeys((n, fds) in fd_strategy()) {
            let schema = schema_of(n);
            let keys = find_keys(&schema, &fds, &KeyConfig::default().with_max_key_size(n)).unwrap();
            prop_assert!(!keys.is_empty());

            for (i, key) in keys.iter().enumerate() {
                prop_assert_eq!(closure(key, &fds), schema.all());
                for removed in key.iter() {
                    let mut smaller = key.clone();
                    smaller.remove(removed);
                    prop_assert_ne!(closure(&smaller, &fds), schema.all());
                }
                for (j, other) in keys.iter().enumerate() {
                    if i != j {
                        prop_assert!(!other.is_subset(key));
                    }
                }
            }
        }

        /// Violations are exactly the dependencies the normal forms forbid.
        #[test]
        fn violations_match_definitions((n, fds) in fd_strategy()) {
            let schema = schema_of(n);
            let keys = find_keys(&schema, &fds, &KeyConfig::default().with_max_key_size(n)).unwrap();
            let report = analyze(&schema, &keys, &fds);
            let prime = prime_attributes(&keys);

            let mut expected_3nf = Vec::new();
            let mut expected_2nf = 0;
            for fd in fds.dependencies() {
                if prime.contains(fd.rhs) {
                    continue;
                }
                if !keys.iter().any(|k| fd.lhs.is_superset(k)) {
                    expected_3nf.push((schema.key_of(&fd.lhs), schema.name(fd.rhs).to_string()));
                }
                expected_2nf += keys.iter().filter(|k| fd.lhs.is_strict_subset(k)).count();
            }

            let actual_3nf: Vec<(String, String)> = report
                .violations_3nf
                .iter()
                .map(|v| (v.lhs().to_string(), v.rhs().to_string()))
                .collect();
            prop_assert_eq!(actual_3nf, expected_3nf);
            prop_assert_eq!(report.violations_2nf.len(), expected_2nf);
        }
    }
}

// =============================================================================
// Synthesis Properties
// =============================================================================

mod synthesis_tests {
    use super::*;

    proptest! {
        /// With a key, relations cover every attribute, hold every determinant
        /// group, and never nest strictly.
        #[test]
        fn decomposition_covers_and_is_reduced(table in table_strategy()) {
            let schema = Schema::from_table(&table).unwrap();
            let fds = FdDiscoverer::new().discover(&table).unwrap();
            let keys = find_keys(&schema, &fds, &KeyConfig::default().with_max_key_size(schema.len())).unwrap();
            let decomposition = synthesize(&table, &schema, &fds, &keys);

            let relations: Vec<AttrSet> = decomposition
                .relations
                .iter()
                .map(|r| schema.resolve(&r.attributes, "test").unwrap())
                .collect();

            let mut covered = AttrSet::new();
            for rel in &relations {
                covered.union_with(rel);
            }
            prop_assert_eq!(covered, schema.all());

            for (lhs, rhs) in fds.groups() {
                let group = lhs.union(rhs);
                prop_assert!(relations.iter().any(|rel| group.is_subset(rel)));
            }
            for (i, a) in relations.iter().enumerate() {
                for (j, b) in relations.iter().enumerate() {
                    if i != j {
                        prop_assert!(!a.is_strict_subset(b));
                        prop_assert_ne!(a, b);
                    }
                }
            }
            prop_assert!(relations.iter().any(|rel| keys[0].is_subset(rel)));
        }

        /// Each relation holds the distinct projections of the source rows.
        #[test]
        fn relation_rows_are_distinct_projections(table in table_strategy()) {
            let schema = Schema::from_table(&table).unwrap();
            let fds = FdDiscoverer::new().discover(&table).unwrap();
            let keys = find_keys(&schema, &fds, &KeyConfig::default()).unwrap();
            let decomposition = synthesize(&table, &schema, &fds, &keys);

            for (i, relation) in decomposition.relations.iter().enumerate() {
                prop_assert_eq!(&relation.name, &format!("table_{}", i + 1));
                let columns: Vec<usize> = relation
                    .data
                    .headers
                    .iter()
                    .map(|h| table.column_index(h).unwrap())
                    .collect();
                let expected: HashSet<Vec<&str>> = table
                    .rows
                    .iter()
                    .map(|row| columns.iter().map(|&c| row[c].as_str()).collect())
                    .collect();
                prop_assert_eq!(relation.row_count(), expected.len());
            }
        }
    }
}

// =============================================================================
// Cleaning Properties
// =============================================================================

mod cleaning_tests {
    use super::*;

    proptest! {
        /// Snake-casing is idempotent and yields only lowercase identifiers.
        #[test]
        fn snake_case_is_idempotent(name in "[a-zA-Z0-9_\\-\\. ()/%]{0,40}") {
            let once = snake_case(&name);
            prop_assert_eq!(snake_case(&once), once.clone());
            prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }

        /// De-duplicated names are unique and keep their order.
        #[test]
        fn deduplicated_names_are_unique(names in prop::collection::vec("[ab]{1,2}", 0..12)) {
            let out = deduplicate_names(&names);
            prop_assert_eq!(out.len(), names.len());
            let unique: HashSet<&String> = out.iter().collect();
            prop_assert_eq!(unique.len(), out.len());
            for (original, renamed) in names.iter().zip(&out) {
                prop_assert!(renamed.starts_with(original.as_str()));
            }
        }
    }
}

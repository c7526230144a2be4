//! Candidate key enumeration.

use tracing::{debug, info, warn};

use crate::closure::ClosureCache;
use crate::combinations::subsets_up_to;
use crate::error::{Result, TabnormError};
use crate::schema::{AttrSet, FdSet, Schema};

/// Configuration for candidate key search.
#[derive(Debug, Clone)]
pub struct KeyConfig {
    /// Largest key size to enumerate.
    pub max_key_size: usize,
    /// Externally asserted keys, checked before enumeration.
    pub known_keys: Vec<Vec<String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            max_key_size: 3,
            known_keys: Vec::new(),
        }
    }
}

impl KeyConfig {
    pub fn with_max_key_size(mut self, max_key_size: usize) -> Self {
        self.max_key_size = max_key_size;
        self
    }

    pub fn with_known_keys(mut self, known_keys: Vec<Vec<String>>) -> Self {
        self.known_keys = known_keys;
        self
    }
}

/// Find candidate keys of `schema` under `fds`.
///
/// Known keys are validated first, in the order given; then every subset of
/// up to `max_key_size` attributes is tried by ascending size, skipping
/// supersets of keys already accepted. An empty result means no key exists
/// within the bound, not that the table has none.
///
/// Known keys that name unknown attributes, or whose closure is not the full
/// attribute set, are skipped with a warning. A known key is not checked for
/// minimality: a superkey given as known stays in the result, and a smaller
/// key found by the search may then be a subset of it. Without known keys no
/// returned key contains another.
pub fn find_keys(schema: &Schema, fds: &FdSet, config: &KeyConfig) -> Result<Vec<AttrSet>> {
    if config.max_key_size == 0 {
        return Err(TabnormError::InvalidBound {
            name: "max_key_size",
            value: 0,
        });
    }

    let universe = schema.all();
    let mut cache = ClosureCache::new();
    let mut keys: Vec<AttrSet> = Vec::new();

    for known in &config.known_keys {
        let Some(key) = schema.try_resolve(known) else {
            warn!(key = %known.join(","), "Known key names an unknown attribute; skipping");
            continue;
        };
        if keys.iter().any(|k| k.is_subset(&key)) {
            debug!(key = %schema.key_of(&key), "Known key contains an accepted key; skipping");
            continue;
        }
        if *cache.closure(&key, fds) == universe {
            debug!(key = %schema.key_of(&key), "Accepted known key");
            keys.push(key);
        } else {
            warn!(key = %known.join(","), "Known key does not determine every attribute; skipping");
        }
    }

    let pool: Vec<usize> = (0..schema.len()).collect();
    for subset in subsets_up_to(&pool, config.max_key_size) {
        if keys.iter().any(|k| k.is_subset(&subset)) {
            continue;
        }
        if *cache.closure(&subset, fds) == universe {
            debug!(key = %schema.key_of(&subset), "Found candidate key");
            keys.push(subset);
        }
    }

    info!(
        keys = keys.len(),
        max_key_size = config.max_key_size,
        closures = cache.len(),
        "Candidate key search finished"
    );
    Ok(keys)
}

/// Attributes that appear in at least one key.
pub fn prime_attributes(keys: &[AttrSet]) -> AttrSet {
    let mut prime = AttrSet::new();
    for key in keys {
        prime.union_with(key);
    }
    prime
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::closure;
    use crate::schema::FunctionalDependency;

    fn set(items: &[usize]) -> AttrSet {
        items.iter().copied().collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// order_id, product_id, product_name, qty
    fn orders() -> (Schema, FdSet) {
        let schema = Schema::new(["order_id", "product_id", "product_name", "qty"]).unwrap();
        let fds = FdSet::from_dependencies([
            FunctionalDependency::new(set(&[1]), 2),
            FunctionalDependency::new(set(&[0, 1]), 3),
        ]);
        (schema, fds)
    }

    #[test]
    fn test_composite_key() {
        let (schema, fds) = orders();
        let keys = find_keys(&schema, &fds, &KeyConfig::default()).unwrap();
        assert_eq!(keys, vec![set(&[0, 1])]);
        assert_eq!(closure(&keys[0], &fds), schema.all());
    }

    #[test]
    fn test_multiple_keys_are_minimal() {
        // a -> b, b -> a, {a, c} -> d
        let schema = Schema::new(["a", "b", "c", "d"]).unwrap();
        let fds = FdSet::from_dependencies([
            FunctionalDependency::new(set(&[0]), 1),
            FunctionalDependency::new(set(&[1]), 0),
            FunctionalDependency::new(set(&[0, 2]), 3),
        ]);
        let keys = find_keys(&schema, &fds, &KeyConfig::default()).unwrap();
        assert_eq!(keys, vec![set(&[0, 2]), set(&[1, 2])]);
    }

    #[test]
    fn test_bound_can_hide_keys() {
        let (schema, fds) = orders();
        let keys = find_keys(&schema, &fds, &KeyConfig::default().with_max_key_size(1)).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_known_keys_come_first() {
        let (schema, fds) = orders();
        let config = KeyConfig::default().with_known_keys(vec![
            strings(&["product_id", "order_id"]),
            strings(&["order_id", "product_id", "qty"]),
        ]);
        let keys = find_keys(&schema, &fds, &config).unwrap();
        // The second known key is a superset of the first and is dropped
        assert_eq!(keys, vec![set(&[0, 1])]);
    }

    #[test]
    fn test_known_superkey_kept_beside_its_subset() {
        let (schema, fds) = orders();
        let config =
            KeyConfig::default().with_known_keys(vec![strings(&["qty", "product_id", "order_id"])]);
        let keys = find_keys(&schema, &fds, &config).unwrap();
        assert_eq!(keys, vec![set(&[0, 1, 3]), set(&[0, 1])]);
        assert!(keys[1].is_strict_subset(&keys[0]));
    }

    #[test]
    fn test_known_key_soft_rejection() {
        let (schema, fds) = orders();
        let config = KeyConfig::default().with_known_keys(vec![
            strings(&["order_id", "price"]),
            strings(&["product_id"]),
        ]);
        let keys = find_keys(&schema, &fds, &config).unwrap();
        assert_eq!(keys, vec![set(&[0, 1])]);
    }

    #[test]
    fn test_single_column_table() {
        let schema = Schema::new(["id"]).unwrap();
        let keys = find_keys(&schema, &FdSet::new(), &KeyConfig::default()).unwrap();
        assert_eq!(keys, vec![set(&[0])]);
    }

    #[test]
    fn test_zero_bound_rejected() {
        let (schema, fds) = orders();
        let err = find_keys(&schema, &fds, &KeyConfig::default().with_max_key_size(0));
        assert!(matches!(err, Err(TabnormError::InvalidBound { .. })));
    }

    #[test]
    fn test_prime_attributes() {
        assert_eq!(prime_attributes(&[set(&[0, 2]), set(&[1, 2])]), set(&[0, 1, 2]));
        assert!(prime_attributes(&[]).is_empty());
    }
}

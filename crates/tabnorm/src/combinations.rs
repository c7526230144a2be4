//! Fixed-size subset enumeration over an indexable attribute list.

use crate::schema::AttrSet;

/// Iterator over every `k`-element subset of `pool`, in lexicographic order
/// of positions within `pool`.
///
/// `Combinations::new(vec![0, 1, 2], 2)` yields `{0,1}`, `{0,2}`, `{1,2}`.
/// Nothing is yielded when `k` is zero or larger than the pool.
#[derive(Debug, Clone)]
pub struct Combinations {
    pool: Vec<usize>,
    positions: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(pool: Vec<usize>, k: usize) -> Self {
        let done = k == 0 || k > pool.len();
        Self {
            positions: (0..k).collect(),
            pool,
            done,
        }
    }

    fn advance(&mut self) {
        let n = self.pool.len();
        let k = self.positions.len();
        // Rightmost position that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.positions[i] < n - k + i) else {
            self.done = true;
            return;
        };
        self.positions[i] += 1;
        for j in i + 1..k {
            self.positions[j] = self.positions[j - 1] + 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = AttrSet;

    fn next(&mut self) -> Option<AttrSet> {
        if self.done {
            return None;
        }
        let subset = self.positions.iter().map(|&p| self.pool[p]).collect();
        self.advance();
        Some(subset)
    }
}

/// Every subset of `pool` with size `1..=max_size`, ascending by size.
pub fn subsets_up_to(pool: &[usize], max_size: usize) -> impl Iterator<Item = AttrSet> + '_ {
    (1..=max_size.min(pool.len())).flat_map(move |k| Combinations::new(pool.to_vec(), k))
}

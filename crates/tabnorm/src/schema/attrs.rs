//! Bitset over column positions.

use std::fmt;

const WORD_BITS: usize = 64;

/// A set of attributes, stored as a bitset over column indices.
///
/// Tables with up to 64 columns fit in a single word; wider tables grow
/// additional words. Trailing zero words are never stored, so two sets with
/// the same members always compare and hash equal.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrSet {
    words: Vec<u64>,
}

impl AttrSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding a single attribute.
    pub fn singleton(index: usize) -> Self {
        let mut set = Self::new();
        set.insert(index);
        set
    }

    /// Create the set `{0, 1, .., n - 1}`.
    pub fn full(n: usize) -> Self {
        (0..n).collect()
    }

    /// Add an attribute. Returns `true` if it was not already present.
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = (index / WORD_BITS, index % WORD_BITS);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << bit;
        let added = self.words[word] & mask == 0;
        self.words[word] |= mask;
        added
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        let (word, bit) = (index / WORD_BITS, index % WORD_BITS);
        let Some(w) = self.words.get_mut(word) else {
            return false;
        };
        let mask = 1u64 << bit;
        let present = *w & mask != 0;
        *w &= !mask;
        self.trim();
        present
    }

    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|w| w & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `self ⊆ other`.
    pub fn is_subset(&self, other: &AttrSet) -> bool {
        self.words
            .iter()
            .enumerate()
            .all(|(i, w)| w & !other.words.get(i).copied().unwrap_or(0) == 0)
    }

    /// `self ⊊ other`.
    pub fn is_strict_subset(&self, other: &AttrSet) -> bool {
        self != other && self.is_subset(other)
    }

    /// `self ⊇ other`.
    pub fn is_superset(&self, other: &AttrSet) -> bool {
        other.is_subset(self)
    }

    /// Add every member of `other` to `self`. Returns `true` if `self` grew.
    pub fn union_with(&mut self, other: &AttrSet) -> bool {
        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut grew = false;
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            let merged = *mine | theirs;
            grew |= merged != *mine;
            *mine = merged;
        }
        grew
    }

    /// Return `self ∪ other`.
    pub fn union(&self, other: &AttrSet) -> AttrSet {
        let mut out = self.clone();
        out.union_with(other);
        out
    }

    /// Iterate over member indices in ascending (column) order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl FromIterator<usize> for AttrSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = AttrSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl fmt::Debug for AttrSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

//! The attribute universe of a table.

use std::collections::HashMap;

use crate::error::{Result, TabnormError};
use crate::input::DataTable;

use super::attrs::AttrSet;

/// Separator used when rendering a determinant as a single key string.
pub const LHS_SEPARATOR: &str = ",";

/// Ordered, unique column identifiers of one table.
///
/// Every [`AttrSet`] handed around the engine indexes into a `Schema`;
/// mixing sets from two different schemas is a logic error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from column names, rejecting duplicates.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(TabnormError::DuplicateAttribute(name.clone()));
            }
        }
        Ok(Self { names, index })
    }

    /// Build a schema from a table's headers.
    pub fn from_table(table: &DataTable) -> Result<Self> {
        Self::new(table.headers.iter().cloned())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All attribute names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name of the attribute at `index`.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The set of every attribute.
    pub fn all(&self) -> AttrSet {
        AttrSet::full(self.names.len())
    }

    /// Resolve names into a set, failing on the first unknown name.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S], context: &str) -> Result<AttrSet> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.index_of(name)
                    .ok_or_else(|| TabnormError::UnknownAttribute {
                        attribute: name.to_string(),
                        context: context.to_string(),
                    })
            })
            .collect()
    }

    /// Resolve names into a set, or `None` if any name is unknown.
    pub fn try_resolve<S: AsRef<str>>(&self, names: &[S]) -> Option<AttrSet> {
        names.iter().map(|name| self.index_of(name.as_ref())).collect()
    }

    /// Names of the members of `set`, in column order.
    pub fn names_of(&self, set: &AttrSet) -> Vec<String> {
        set.iter().map(|i| self.names[i].clone()).collect()
    }

    /// Render `set` as a canonical key: names in column order joined by `,`.
    pub fn key_of(&self, set: &AttrSet) -> String {
        set.iter()
            .map(|i| self.names[i].as_str())
            .collect::<Vec<_>>()
            .join(LHS_SEPARATOR)
    }

    /// Parse a canonical key back into a set.
    pub fn parse_key(&self, key: &str, context: &str) -> Result<AttrSet> {
        let names: Vec<&str> = key.split(LHS_SEPARATOR).collect();
        self.resolve(&names, context)
    }
}

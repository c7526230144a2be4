//! Attribute sets, the attribute universe, and functional dependencies.

mod attrs;
mod fd;
mod table;

pub use attrs::AttrSet;
pub use fd::{FdSet, FunctionalDependency, NamedFds};
pub use table::{LHS_SEPARATOR, Schema};

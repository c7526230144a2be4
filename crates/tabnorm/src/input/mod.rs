//! Input parsing, cleaning, and data source handling.

mod clean;
mod known_keys;
mod parser;
mod source;

pub use clean::{CleaningConfig, clean_table, context_columns, deduplicate_names, snake_case};
pub use known_keys::{load_known_keys, parse_known_keys};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};

//! CLI command implementations.

pub mod analyze;
pub mod clean;
pub mod decompose;
pub mod discover;
pub mod pipeline;

use std::path::Path;

use tabnorm::{DataTable, Parser, ParserConfig, SourceMetadata};

use crate::cli::InputArgs;

/// Parse the input file, failing early with a readable message if it is missing.
pub fn load_table(
    file: &Path,
    input: &InputArgs,
) -> Result<(DataTable, SourceMetadata), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(Parser::with_config(parser_config(input)).parse_file(file)?)
}

/// Parser settings from the shared input options.
pub fn parser_config(input: &InputArgs) -> ParserConfig {
    let mut config = ParserConfig::default();
    if let Some(d) = input.delimiter {
        config = config.with_delimiter(d);
    }
    if input.no_header {
        config = config.without_header();
    }
    config
}

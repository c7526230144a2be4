//! Loading externally asserted keys.

use std::fs;
use std::path::Path;

use crate::error::{Result, TabnormError};

/// Parse known keys: one key per non-blank line, attributes comma-separated.
pub fn parse_known_keys(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').map(|a| a.trim().to_string()).collect())
        .collect()
}

/// Load known keys from a file.
///
/// Attribute names are not checked here; keys naming unknown attributes are
/// rejected later by the key finder.
pub fn load_known_keys(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| TabnormError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_known_keys(&text))
}

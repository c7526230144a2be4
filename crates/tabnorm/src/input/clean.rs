//! Row-wise cleaning that turns a raw export into a column-unique table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::source::DataTable;

// Separators folded into `_`, then anything outside [a-z0-9_] is dropped.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-/.]+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Which cleaning steps to run.
#[derive(Debug, Clone)]
pub struct CleaningConfig {
    /// Convert column names to snake_case and make them unique.
    pub normalize_names: bool,
    /// Drop rows whose cells are all blank.
    pub drop_empty_rows: bool,
    /// Fill blank cells of context columns from the row above.
    pub forward_fill: bool,
    /// Strip surrounding whitespace from every cell.
    pub trim_whitespace: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            normalize_names: true,
            drop_empty_rows: true,
            forward_fill: true,
            trim_whitespace: true,
        }
    }
}

impl CleaningConfig {
    /// A configuration that leaves the table untouched.
    pub fn disabled() -> Self {
        Self {
            normalize_names: false,
            drop_empty_rows: false,
            forward_fill: false,
            trim_whitespace: false,
        }
    }
}

/// Lowercase `name` and reduce it to `[a-z0-9_]`.
///
/// `"Employee ID"` becomes `employee_id`, `"Dept./Name"` becomes `dept_name`.
pub fn snake_case(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let separated = SEPARATORS.replace_all(&lowered, "_");
    let allowed = DISALLOWED.replace_all(&separated, "");
    let collapsed = UNDERSCORES.replace_all(&allowed, "_");
    collapsed.trim_matches('_').to_string()
}

/// Make names unique by suffixing repeats with `.1`, `.2`, ...
pub fn deduplicate_names(names: &[String]) -> Vec<String> {
    let mut suffixes: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        while out.contains(&candidate) {
            let n = suffixes.entry(name.as_str()).or_insert(0);
            *n += 1;
            candidate = format!("{name}.{n}");
        }
        out.push(candidate);
    }
    out
}

/// Columns whose base name (before the first `.`) occurs exactly once.
///
/// Repeated groups such as `phone`, `phone.1` are not context columns and
/// are never forward-filled. Raw duplicates are already renamed to
/// `phone_1` before snake-casing, so only names that collide after
/// snake-casing (`Phone`, `phone`) form such a group.
pub fn context_columns(headers: &[String]) -> Vec<usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for h in headers {
        *counts.entry(base_name(h)).or_insert(0) += 1;
    }
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| counts[base_name(h)] == 1)
        .map(|(i, _)| i)
        .collect()
}

fn base_name(header: &str) -> &str {
    header.split('.').next().unwrap_or(header)
}

/// Clean a raw table according to `config`.
pub fn clean_table(table: &DataTable, config: &CleaningConfig) -> DataTable {
    let headers = if config.normalize_names {
        let snake: Vec<String> = deduplicate_names(&table.headers)
            .iter()
            .map(|h| snake_case(h))
            .collect();
        deduplicate_names(&snake)
    } else {
        table.headers.clone()
    };

    let mut rows: Vec<Vec<String>> = table.rows.clone();

    if config.drop_empty_rows {
        let before = rows.len();
        rows.retain(|row| row.iter().any(|v| !v.trim().is_empty()));
        if rows.len() != before {
            debug!(dropped = before - rows.len(), "Dropped empty rows");
        }
    }

    if config.forward_fill {
        for col in context_columns(&headers) {
            let mut last: Option<String> = None;
            for row in rows.iter_mut() {
                let Some(cell) = row.get_mut(col) else {
                    continue;
                };
                if cell.is_empty() {
                    if let Some(prev) = &last {
                        cell.clone_from(prev);
                    }
                } else {
                    last = Some(cell.clone());
                }
            }
        }
    }

    if config.trim_whitespace {
        for cell in rows.iter_mut().flatten() {
            let trimmed = cell.trim();
            if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
            }
        }
    }

    DataTable::new(headers, rows, table.delimiter)
}

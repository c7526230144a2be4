//! Data source abstraction and metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// Rectangular tabular data with every value kept as a string.
///
/// An empty string is an ordinary value meaning "no value"; there is no
/// separate null marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Build a comma-delimited table from string slices.
    pub fn from_records<H, R, V>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self::new(
            headers.into_iter().map(Into::into).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            b',',
        )
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| {
            row.get(index)
                .map(|s| s.as_str())
                .unwrap_or("")
        })
    }

    /// Keep only the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> DataTable {
        DataTable::new(
            self.headers.clone(),
            indices.iter().map(|&i| self.rows[i].clone()).collect(),
            self.delimiter,
        )
    }

    /// Project onto the columns at `columns` (kept in the given order) and
    /// drop duplicate rows, keeping first occurrences.
    pub fn project_distinct(&self, columns: &[usize]) -> DataTable {
        let headers = columns.iter().map(|&c| self.headers[c].clone()).collect();
        let mut seen: HashSet<Vec<&str>> = HashSet::new();
        let mut rows = Vec::new();
        for row in &self.rows {
            let projected: Vec<&str> = columns
                .iter()
                .map(|&c| row.get(c).map(String::as_str).unwrap_or(""))
                .collect();
            if seen.insert(projected.clone()) {
                rows.push(projected.into_iter().map(str::to_string).collect());
            }
        }
        DataTable::new(headers, rows, self.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::from_records(
            ["id", "dept", "city"],
            [
                ["1", "eng", "Oslo"],
                ["2", "ops", "Rome"],
                ["3", "eng", "Oslo"],
                ["4", "eng", ""],
            ],
        )
    }

    #[test]
    fn test_accessors() {
        let t = table();
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.rows[1][2], "Rome");
        let dept = t.column_index("dept").unwrap();
        assert_eq!(t.column_values(dept).collect::<Vec<_>>(), vec!["eng", "ops", "eng", "eng"]);
        assert!(t.column_index("salary").is_none());
    }

    #[test]
    fn test_project_distinct_keeps_first_occurrence() {
        let projected = table().project_distinct(&[1, 2]);
        assert_eq!(projected.headers, vec!["dept", "city"]);
        assert_eq!(
            projected.rows,
            vec![vec!["eng", "Oslo"], vec!["ops", "Rome"], vec!["eng", ""]]
        );
    }

    #[test]
    fn test_select_rows() {
        let picked = table().select_rows(&[3, 0]);
        assert_eq!(picked.rows[0][0], "4");
        assert_eq!(picked.rows[1][0], "1");
    }
}

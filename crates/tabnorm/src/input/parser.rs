//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use super::clean::deduplicate_names;
use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, TabnormError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Force a delimiter instead of detecting it.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Treat the first row as data and name columns `column_1`, `column_2`, ...
    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }

    /// Read at most `max_rows` data rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| TabnormError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let data_table = self.parse_with_delimiter(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        info!(
            file = %path.display(),
            rows = data_table.row_count(),
            columns = data_table.column_count(),
            format = %format,
            "Loaded table"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse in-memory bytes, detecting the delimiter unless configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_with_delimiter(bytes, delimiter)
    }

    fn parse_with_delimiter(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        if delimiter == self.config.quote {
            return Err(TabnormError::Config(format!(
                "Delimiter and quote character are both '{}'",
                delimiter as char
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            // Repeated header cells become `name.1`, `name.2`, ...
            let raw: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
            deduplicate_names(&raw)
        } else {
            // Generate column names
            match records.first() {
                Some(record) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                None => return Err(TabnormError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() {
            return Err(TabnormError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                // Ragged rows are padded or truncated to the header width
                row.resize(expected_cols, String::new());
                row
            })
            .collect();

        if rows.is_empty() {
            return Err(TabnormError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TabnormError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a slight bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_single_column_defaults_to_comma() {
        let data = b"order_id\n1\n2";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], "Alice");
        assert_eq!(table.rows[1][1], "25");
    }

    #[test]
    fn test_values_stay_strings() {
        let table = Parser::new().parse_bytes(b"a,b\nNA,\nnull,007").unwrap();
        assert_eq!(table.rows[0], vec!["NA", ""]);
        assert_eq!(table.rows[1], vec!["null", "007"]);
    }

    #[test]
    fn test_repeated_headers_are_suffixed() {
        let table = Parser::new().parse_bytes(b"id,Phone,Phone
1,555-1,555-2").unwrap();
        assert_eq!(table.headers, vec!["id", "Phone", "Phone.1"]);
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig::default().without_header());
        let table = parser.parse_bytes(b"1,eng,Oslo
2,ops,Rome").unwrap();
        assert_eq!(table.headers, vec!["column_1", "column_2", "column_3"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], vec!["1", "eng", "Oslo"]);
    }

    #[test]
    fn test_ragged_rows_normalized() {
        let table = Parser::new().parse_bytes(b"a,b,c\n1,2\n3,4,5,6").unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["3", "4", "5"]);
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let err = Parser::new().parse_bytes(b"a,b,c\n").unwrap_err();
        assert!(matches!(err, TabnormError::EmptyData(_)));
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_max_rows(1));
        let table = parser.parse_bytes(b"a\n1\n2\n3").unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_delimiter_equal_to_quote() {
        let parser = Parser::with_config(ParserConfig::default().with_delimiter(b'"'));
        let err = parser.parse_bytes(b"a\"b\n1\"2").unwrap_err();
        assert!(matches!(err, TabnormError::Config(_)));
    }
}

//! Persistence for analysis artifacts - JSON records and projected CSVs.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{Result, TabnormError};
use crate::input::DataTable;
use crate::schema::{FdSet, NamedFds, Schema};
use crate::synthesis::Decomposition;

use super::analysis::{DecompositionSummary, KeyAnalysis, RelationSummary};

/// File name of the summary written next to the relation CSVs.
pub const DECOMPOSITION_SUMMARY_FILE: &str = "3nf_decomposition_summary.json";

/// Write `fds` as a JSON object of LHS key to RHS names.
pub fn write_fds(path: impl AsRef<Path>, fds: &FdSet, schema: &Schema) -> Result<()> {
    save_json(path.as_ref(), &fds.to_named(schema))
}

/// Read an FD file written by [`write_fds`], resolving names against `schema`.
pub fn read_fds(path: impl AsRef<Path>, schema: &Schema) -> Result<FdSet> {
    let named: NamedFds = load_json(path.as_ref())?;
    FdSet::from_named(schema, &named)
}

/// Write `table` as comma-separated values with a header row.
pub fn write_table(path: impl AsRef<Path>, table: &DataTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| TabnormError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

impl KeyAnalysis {
    /// Save the analysis to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_json(path.as_ref(), self)
    }

    /// Load an analysis from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref())
    }
}

impl DecompositionSummary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref())
    }
}

impl Decomposition {
    /// Write one CSV per relation plus the summary JSON into `out_dir`.
    ///
    /// # Example
    ///
    /// File structure after calling:
    /// ```text
    /// out/
    /// ├── table_1.csv
    /// ├── table_2.csv
    /// └── 3nf_decomposition_summary.json
    /// ```
    pub fn write(&self, out_dir: impl AsRef<Path>) -> Result<DecompositionSummary> {
        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir).map_err(|e| {
            TabnormError::Persistence(format!(
                "Failed to create directory '{}': {}",
                out_dir.display(),
                e
            ))
        })?;

        let mut relations = Vec::with_capacity(self.relations.len());
        for relation in &self.relations {
            let csv_path = out_dir.join(format!("{}.csv", relation.name));
            write_table(&csv_path, &relation.data)?;
            info!(
                table = %relation.name,
                rows = relation.row_count(),
                columns = relation.attributes.len(),
                "Saved relation"
            );
            relations.push(RelationSummary {
                table: relation.name.clone(),
                attributes: relation.attributes.clone(),
                num_rows: relation.row_count(),
                csv: csv_path,
            });
        }

        let summary = DecompositionSummary {
            relations,
            candidate_keys: self.candidate_keys.clone(),
        };
        save_json(&out_dir.join(DECOMPOSITION_SUMMARY_FILE), &summary)?;
        Ok(summary)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                TabnormError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| {
        TabnormError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        TabnormError::Persistence(format!("Failed to serialize '{}': {}", path.display(), e))
    })?;
    writer.flush().map_err(|e| {
        TabnormError::Persistence(format!("Failed to write '{}': {}", path.display(), e))
    })?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| TabnormError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        TabnormError::Persistence(format!("Failed to parse '{}': {}", path.display(), e))
    })
}

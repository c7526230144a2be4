//! Decompose command - synthesize 3NF relations and write them out.

use std::path::PathBuf;

use colored::Colorize;
use tabnorm::output::read_fds;
use tabnorm::{DecompositionSummary, KeyAnalysis, Schema, synthesize};

use crate::cli::InputArgs;

pub fn run(
    file: PathBuf,
    fds_path: PathBuf,
    keys_path: PathBuf,
    out_dir: PathBuf,
    input: InputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    for (path, stage) in [(&fds_path, "discover"), (&keys_path, "analyze")] {
        if !path.exists() {
            return Err(format!(
                "File not found: {}\nRun 'tabnorm {} {}' first.",
                path.display(),
                stage,
                file.display()
            )
            .into());
        }
    }

    let (table, _) = super::load_table(&file, &input)?;
    let schema = Schema::from_table(&table)?;
    let fds = read_fds(&fds_path, &schema)?;
    let keys = KeyAnalysis::load(&keys_path)?.keys(&schema)?;

    let decomposition = synthesize(&table, &schema, &fds, &keys);
    let summary = decomposition.write(&out_dir)?;
    print_summary(&summary);
    Ok(())
}

pub fn print_summary(summary: &DecompositionSummary) {
    for relation in &summary.relations {
        println!(
            "Saved {}: {} rows, {} columns ({})",
            relation.table.white().bold(),
            relation.num_rows,
            relation.attributes.len(),
            relation.attributes.join(", ").dimmed()
        );
    }
    if summary.relations.is_empty() {
        println!(
            "{} No relations produced; no dependencies or keys were found.",
            "Warning:".yellow().bold()
        );
    }
    println!("{}", "3NF decomposition summary saved.".green().bold());
}

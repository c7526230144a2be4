//! Clean command - turn a raw export into a column-unique table.

use std::path::PathBuf;

use colored::Colorize;
use tabnorm::input::{CleaningConfig, clean_table};
use tabnorm::output::write_table;

use crate::cli::InputArgs;

pub fn run(file: PathBuf, output: PathBuf, input: InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} {}",
        "Loading".cyan().bold(),
        file.display().to_string().white()
    );
    let (raw, _) = super::load_table(&file, &input)?;

    let cleaned = clean_table(&raw, &CleaningConfig::default());
    println!(
        "Cleaned shape: {} rows, {} columns",
        cleaned.row_count().to_string().white().bold(),
        cleaned.column_count().to_string().white().bold()
    );

    write_table(&output, &cleaned)?;
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output.display().to_string().white()
    );
    Ok(())
}

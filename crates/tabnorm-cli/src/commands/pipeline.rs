//! Run command - every stage from raw file to decomposition.

use std::path::PathBuf;

use colored::Colorize;
use tabnorm::input::CleaningConfig;
use tabnorm::output::{write_fds, write_table};
use tabnorm::{Normalizer, NormalizerConfig};

use crate::cli::{DiscoveryArgs, InputArgs, KeyArgs};

pub fn run(
    file: PathBuf,
    out_dir: PathBuf,
    no_clean: bool,
    input: InputArgs,
    search: DiscoveryArgs,
    keys: KeyArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Normalizing".cyan().bold(),
        file.display().to_string().white()
    );

    let config = NormalizerConfig {
        parser: super::parser_config(&input),
        cleaning: if no_clean {
            CleaningConfig::disabled()
        } else {
            CleaningConfig::default()
        },
        discovery: super::discover::discovery_config(&search),
        keys: super::analyze::key_config(&keys)?,
    };

    let result = Normalizer::with_config(config).run(&file)?;

    write_table(out_dir.join("cleaned.csv"), &result.table)?;
    write_fds(out_dir.join("fds.json"), &result.fds, &result.schema)?;
    result.analysis.save(out_dir.join("keys_nf.json"))?;

    println!(
        "Found {} minimal, nontrivial FDs over {} determinants",
        result.summary.dependency_count.to_string().white().bold(),
        result.summary.determinant_count
    );
    if verbose {
        for (lhs, rhs) in result.fds.to_named(&result.schema) {
            println!("  {} -> {}", lhs, rhs.join(", "));
        }
    }
    println!();
    super::analyze::print_analysis(&result.analysis);
    println!();

    let summary = result.decomposition.write(&out_dir)?;
    super::decompose::print_summary(&summary);

    println!();
    println!("{}", result.summary.recommendation);
    println!(
        "{} {}",
        "Outputs in".green().bold(),
        out_dir.display().to_string().white()
    );
    Ok(())
}

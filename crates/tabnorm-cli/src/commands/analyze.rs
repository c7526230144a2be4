//! Analyze command - candidate keys and 2NF/3NF violations.

use std::path::PathBuf;

use colored::Colorize;
use tabnorm::input::load_known_keys;
use tabnorm::output::read_fds;
use tabnorm::{KeyAnalysis, KeyConfig, Schema, analyze, find_keys};

use crate::cli::{InputArgs, KeyArgs};

pub fn run(
    file: PathBuf,
    fds_path: PathBuf,
    output: PathBuf,
    input: InputArgs,
    keys: KeyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if !fds_path.exists() {
        return Err(format!(
            "Dependency file not found: {}\nRun 'tabnorm discover {}' first.",
            fds_path.display(),
            file.display()
        )
        .into());
    }

    let (table, _) = super::load_table(&file, &input)?;
    let schema = Schema::from_table(&table)?;
    let fds = read_fds(&fds_path, &schema)?;

    let config = key_config(&keys)?;
    let candidate_keys = find_keys(&schema, &fds, &config)?;
    let report = analyze(&schema, &candidate_keys, &fds);
    let analysis = KeyAnalysis::new(&schema, &candidate_keys, report);

    print_analysis(&analysis);

    analysis.save(&output)?;
    println!(
        "{} {}",
        "Saved analysis to".green().bold(),
        output.display().to_string().white()
    );
    Ok(())
}

pub fn key_config(keys: &KeyArgs) -> Result<KeyConfig, Box<dyn std::error::Error>> {
    let mut config = KeyConfig::default().with_max_key_size(keys.max_key_size);
    if let Some(path) = &keys.known_keys {
        config = config.with_known_keys(load_known_keys(path)?);
    }
    Ok(config)
}

pub fn print_analysis(analysis: &KeyAnalysis) {
    println!("{}", "Candidate Keys:".yellow().bold());
    if analysis.candidate_keys.is_empty() {
        println!("  {}", "(none within the search bound)".dimmed());
    }
    for key in &analysis.candidate_keys {
        println!("  - {}", key.join(", "));
    }
    let count = |n: usize| {
        if n == 0 {
            n.to_string().green()
        } else {
            n.to_string().red()
        }
    };
    println!("2NF Violations: {}", count(analysis.violations_2nf.len()));
    println!("3NF Violations: {}", count(analysis.violations_3nf.len()));
}

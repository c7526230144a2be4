//! Discover command - find minimal functional dependencies.

use std::path::PathBuf;

use colored::Colorize;
use tabnorm::output::write_fds;
use tabnorm::{DiscoveryConfig, FdDiscoverer, Schema};

use crate::cli::{DiscoveryArgs, InputArgs};

/// Dependency groups shown in the closing summary.
const PREVIEW_GROUPS: usize = 5;

pub fn run(
    file: PathBuf,
    output: PathBuf,
    input: InputArgs,
    search: DiscoveryArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (table, source) = super::load_table(&file, &input)?;
    println!(
        "Loaded: {} ({} rows, {} columns)",
        file.display().to_string().white(),
        source.row_count,
        source.column_count
    );

    println!(
        "{} (max LHS size={})...",
        "Discovering minimal FDs".cyan().bold(),
        search.max_lhs_size
    );
    let config = discovery_config(&search);
    let fds = FdDiscoverer::with_config(config).discover(&table)?;
    let schema = Schema::from_table(&table)?;

    println!(
        "Found {} minimal, nontrivial FDs.",
        fds.len().to_string().white().bold()
    );

    write_fds(&output, &fds, &schema)?;
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output.display().to_string().white()
    );

    let named = fds.to_named(&schema);
    let shown = if verbose { named.len() } else { PREVIEW_GROUPS };
    if !named.is_empty() {
        println!();
        println!("{}", "Dependency groups:".yellow().bold());
        for (lhs, rhs) in named.iter().take(shown) {
            println!("  {} -> {}", lhs, rhs.join(", "));
        }
        if named.len() > shown {
            println!("  ... {} more (use --verbose to list all)", named.len() - shown);
        }
    }
    Ok(())
}

pub fn discovery_config(search: &DiscoveryArgs) -> DiscoveryConfig {
    let mut config = DiscoveryConfig::default()
        .with_max_lhs_size(search.max_lhs_size)
        .with_seed(search.seed);
    if let Some(n) = search.sample_size {
        config = config.with_sample_size(n);
    }
    config
}

//! Example: Normalize a tabular data file with tabnorm.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> [max_lhs_size]
//!
//! Example:
//!   cargo run --example analyze -- orders.csv 2

use std::env;
use std::path::Path;

use tabnorm::{DiscoveryConfig, Normalizer, NormalizerConfig};

fn main() -> tabnorm::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [max_lhs_size]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- orders.csv 2");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let max_lhs_size = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2);

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("tabnorm Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let config = NormalizerConfig {
        discovery: DiscoveryConfig::default().with_max_lhs_size(max_lhs_size),
        ..Default::default()
    };
    let result = Normalizer::with_config(config).run(path)?;

    // Print source metadata
    if let Some(source) = &result.source {
        println!("## Source Metadata");
        println!("  File: {}", source.file);
        println!("  Format: {}", source.format);
        println!("  Rows: {}", source.row_count);
        println!("  Columns: {}", source.column_count);
        println!();
    }

    // Print dependencies
    let named = result.fds.to_named(&result.schema);
    println!("## Functional Dependencies ({} total)", result.fds.len());
    println!();
    for (lhs, rhs) in &named {
        println!("  {:30} -> {}", lhs, rhs.join(", "));
    }
    println!();

    // Print keys
    println!("## Candidate Keys ({})", result.analysis.candidate_keys.len());
    for key in &result.analysis.candidate_keys {
        println!("  ({})", key.join(", "));
    }
    println!();

    // Print violations
    for (label, violations) in [
        ("2NF", &result.analysis.violations_2nf),
        ("3NF", &result.analysis.violations_3nf),
    ] {
        if !violations.is_empty() {
            println!("### {} Violations ({}):", label, violations.len());
            for v in violations {
                println!("  {} -> {}", v.lhs(), v.rhs());
            }
            println!();
        }
    }

    // Print relations
    println!("## Relations ({} total)", result.decomposition.relations.len());
    println!();
    for relation in &result.decomposition.relations {
        println!(
            "  {:10} rows={:<6} ({})",
            relation.name,
            relation.row_count(),
            relation.attributes.join(", ")
        );
    }
    println!();

    println!("## Summary");
    println!("  Recommendation: {}", result.summary.recommendation);
    println!();

    println!("{}", separator);

    Ok(())
}

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tabnorm::discovery::DEFAULT_SEED;

/// tabnorm: infer a 3NF schema from a denormalized table
#[derive(Parser)]
#[command(name = "tabnorm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize column names, forward-fill continuation rows, trim cells
    Clean {
        /// Path to the raw data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned CSV
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Discover minimal functional dependencies
    Discover {
        /// Path to a cleaned data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the dependency JSON
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        search: DiscoveryArgs,
    },

    /// Find candidate keys and 2NF/3NF violations
    Analyze {
        /// Path to a cleaned data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dependency JSON written by `discover`
        #[arg(long)]
        fds: PathBuf,

        /// Output path for the key analysis JSON
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Synthesize 3NF relations and write them as CSV files
    Decompose {
        /// Path to a cleaned data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dependency JSON written by `discover`
        #[arg(long)]
        fds: PathBuf,

        /// Key analysis JSON written by `analyze`
        #[arg(long)]
        keys: PathBuf,

        /// Directory for relation CSVs and the summary
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Run every stage, from raw file to decomposition
    Run {
        /// Path to the raw data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for all outputs
        #[arg(long)]
        out_dir: PathBuf,

        /// Skip cleaning (input is already clean)
        #[arg(long)]
        no_clean: bool,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        search: DiscoveryArgs,

        #[command(flatten)]
        keys: KeyArgs,
    },
}

/// Options for reading the input table.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Field delimiter (auto-detected when omitted)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Treat the first row as data; columns are named column_1, column_2, ...
    #[arg(long)]
    pub no_header: bool,
}

/// Options bounding dependency discovery.
#[derive(Args, Clone, Debug)]
pub struct DiscoveryArgs {
    /// Maximum number of attributes on the left-hand side
    #[arg(long, default_value = "2")]
    pub max_lhs_size: usize,

    /// Rows to sample for discovery (all rows when omitted)
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Seed for the row sample
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options bounding candidate key search.
#[derive(Args, Clone, Debug)]
pub struct KeyArgs {
    /// Maximum candidate key size to check
    #[arg(long, default_value = "3")]
    pub max_key_size: usize,

    /// File with known keys, one per line, attributes comma-separated
    #[arg(long)]
    pub known_keys: Option<PathBuf>,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Unknown delimiter: {}. Use a single character, tab, comma, semicolon, or pipe.",
            s
        )),
    }
}

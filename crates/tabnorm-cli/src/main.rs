//! tabnorm CLI - relational schema inference for tabular exports.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            input,
        } => commands::clean::run(file, output, input),

        Commands::Discover {
            file,
            output,
            input,
            search,
        } => commands::discover::run(file, output, input, search, cli.verbose),

        Commands::Analyze {
            file,
            fds,
            output,
            input,
            keys,
        } => commands::analyze::run(file, fds, output, input, keys),

        Commands::Decompose {
            file,
            fds,
            keys,
            out_dir,
            input,
        } => commands::decompose::run(file, fds, keys, out_dir, input),

        Commands::Run {
            file,
            out_dir,
            no_clean,
            input,
            search,
            keys,
        } => commands::pipeline::run(file, out_dir, no_clean, input, search, keys, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "tabnorm=info" } else { "tabnorm=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

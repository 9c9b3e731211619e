// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

mod candidates;
mod error;
mod info;
mod resolve;

use clap::{Parser, Subcommand};
use error::result_to_exit_code;
use std::process::ExitCode;

/// xiresolve - Locate the XIMEA xiAPI native library on this host
#[derive(Parser)]
#[command(name = "xiresolve")]
#[command(version)]
#[command(about = "xiresolve - Locate the XIMEA xiAPI native library on this host")]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=trace for more)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the library file names tried for a platform, in order
    Candidates(candidates::Args),

    /// Run the tiered search on this host and report where the library was found
    Resolve(resolve::Args),

    /// Show the host settings that affect resolution
    Info(info::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Candidates(args) => candidates::execute(args, cli.json),
        Commands::Resolve(args) => resolve::execute(args, cli.json),
        Commands::Info(args) => info::execute(args, cli.json),
    };

    result_to_exit_code(result)
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    let env = env_logger::Env::default();

    let env = if quiet {
        env.default_filter_or("error")
    } else if verbose {
        env.default_filter_or("debug")
    } else {
        env.default_filter_or("warn")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None) // Disable timestamps for cleaner CLI output
        .format_target(false) // Disable target (module path) for cleaner output
        .init();

    log::debug!("Logging initialized");
}

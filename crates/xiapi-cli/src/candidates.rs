// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;
use xiapi_resolver::Platform;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Platform to list (windows, linux, macos, other) [default: this host]
    #[arg(short, long)]
    platform: Option<Platform>,
}

#[derive(Debug, Serialize)]
struct CandidatesOutput {
    platform: String,
    candidates: Vec<&'static str>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing candidates command: {:?}", args);

    let platform = args.platform.unwrap_or_else(Platform::current);
    let output = CandidatesOutput {
        platform: platform.to_string(),
        candidates: platform.candidates().to_vec(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.candidates.is_empty() {
        println!("No candidate names for platform {}", output.platform);
        return Ok(());
    }

    println!("Candidates for {}:", output.platform);
    for (i, name) in output.candidates.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }

    Ok(())
}

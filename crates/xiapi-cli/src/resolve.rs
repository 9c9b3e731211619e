// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Run the xiAPI resolver against the real host and report the outcome.

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;
use xiapi_resolver::{is_target, Platform, Resolver, NATIVE_PATH_VAR};
use xiapi_sys::{XIAPI_LIBRARY, XIAPI_MODULE};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Library name as requested by the interop layer
    #[arg(short, long, default_value = XIAPI_LIBRARY)]
    name: String,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    requested: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing resolve command: {:?}", args);

    if args.name.trim().is_empty() {
        return Err(CliError::InvalidArgs("--name must not be empty".into()));
    }

    let resolved = Resolver::system().resolve(&args.name, &XIAPI_MODULE, None)?;

    let output = match resolved {
        Some(resolved) => ResolveOutput {
            requested: args.name,
            status: "resolved",
            tier: Some(resolved.tier.as_str()),
            candidate: Some(resolved.candidate),
            path: resolved.path.map(|path| path.display().to_string()),
        },
        None if !is_target(&args.name) => ResolveOutput {
            requested: args.name,
            status: "deferred",
            tier: None,
            candidate: None,
            path: None,
        },
        None => {
            return Err(CliError::NotFound(format!(
                "{} (tried {:?}; set {} to the directory holding the SDK)",
                args.name,
                Platform::current().candidates(),
                NATIVE_PATH_VAR
            )));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match (output.tier, output.candidate) {
        (Some(tier), Some(candidate)) => {
            println!("{} resolved via {}", output.requested, tier);
            println!("  Candidate: {}", candidate);
            if let Some(path) = &output.path {
                println!("  Path:      {}", path);
            }
        }
        _ => println!(
            "{} is not the xiAPI library ({}); deferred to default resolution",
            output.requested, XIAPI_LIBRARY
        ),
    }

    Ok(())
}

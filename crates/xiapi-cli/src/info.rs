// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;
use xiapi_resolver::{Host, ProcessHost, NATIVE_PATH_VAR, TARGET_LIBRARY};
use xiapi_sys::import;

#[derive(ClapArgs, Debug)]
pub struct Args {}

#[derive(Debug, Serialize)]
struct InfoOutput {
    platform: String,
    target: &'static str,
    candidates: Vec<&'static str>,
    hooks_supported: bool,
    application_directory: Option<String>,
    native_path: Option<String>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing info command: {:?}", args);

    let host = ProcessHost;
    let platform = host.platform();
    let output = InfoOutput {
        platform: platform.to_string(),
        target: TARGET_LIBRARY,
        candidates: platform.candidates().to_vec(),
        hooks_supported: import::hooks_supported(),
        application_directory: host.base_directory().map(|dir| dir.display().to_string()),
        native_path: host.fallback_directory().map(|dir| dir.display().to_string()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Platform:              {}", output.platform);
    println!("Target library:        {}", output.target);
    println!("Candidates:            {}", output.candidates.join(", "));
    println!("Import hooks:          {}", yes_no(output.hooks_supported));
    println!(
        "Application directory: {}",
        output.application_directory.as_deref().unwrap_or("(unknown)")
    );
    println!(
        "{}:     {}",
        NATIVE_PATH_VAR,
        output.native_path.as_deref().unwrap_or("(not set)")
    );

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

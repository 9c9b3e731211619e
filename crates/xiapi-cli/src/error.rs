// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments
    InvalidArgs(String),
    /// No tier found the library
    NotFound(String),
    /// A library file was found but could not be loaded
    LoadFailed(String),
    /// Any other failure
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::NotFound(msg) => write!(f, "Library not found: {}", msg),
            CliError::LoadFailed(msg) => write!(f, "Library failed to load: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidArgs(_) => ExitCode::from(2),
            CliError::NotFound(_) => ExitCode::from(3),
            CliError::LoadFailed(_) => ExitCode::from(4),
            CliError::General(_) => ExitCode::from(1),
        }
    }
}

/// Map xiapi_sys::Error to CliError with appropriate exit codes
impl From<xiapi_sys::Error> for CliError {
    fn from(err: xiapi_sys::Error) -> Self {
        use xiapi_sys::Error;

        match err {
            Error::LoadFailed { path, source } => {
                CliError::LoadFailed(format!("{}: {}", path.display(), source))
            }
            Error::NotFound { name } => CliError::NotFound(name),
            err @ Error::ResolverAlreadySet(_) => CliError::General(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::General(format!("JSON serialization failed: {}", err))
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}

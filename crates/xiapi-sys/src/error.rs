// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::{error, fmt, path::PathBuf};

/// Error type for native library loading
#[derive(Debug)]
pub enum Error {
    /// A library file exists at `path` but the platform loader rejected it
    /// (wrong architecture, corrupt image, missing dependencies)
    LoadFailed {
        path: PathBuf,
        source: libloading::Error,
    },

    /// Neither the module's resolver nor the default search produced a handle
    NotFound { name: String },

    /// A resolver hook is already registered for the named module
    ResolverAlreadySet(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LoadFailed { path, source } => {
                write!(f, "failed to load {}: {}", path.display(), source)
            }
            Error::NotFound { name } => {
                write!(f, "unable to load native library '{}'", name)
            }
            Error::ResolverAlreadySet(module) => {
                write!(f, "import resolver already set for module '{}'", module)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::LoadFailed { source, .. } => Some(source),
            Error::NotFound { .. } => None,
            Error::ResolverAlreadySet(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound {
            name: "xiapi64.dll".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "unable to load native library 'xiapi64.dll'"
        );

        let err = Error::ResolverAlreadySet("xiapi".to_string());
        assert_eq!(
            format!("{}", err),
            "import resolver already set for module 'xiapi'"
        );
        assert!(error::Error::source(&err).is_none());
    }
}

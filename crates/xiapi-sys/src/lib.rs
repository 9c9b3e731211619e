// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Host loading layer for the XIMEA xiAPI camera SDK
//!
//! The xiAPI interop declarations are compiled against a single Windows
//! library name, [`XIAPI_LIBRARY`]. Every load of the SDK goes through
//! [`import::load_import`] on behalf of [`XIAPI_MODULE`], which gives a
//! resolver hook registered for that module the chance to supply the right
//! library for the current host.
//!
//! Without a hook the name is looked up verbatim, which only succeeds where
//! `xiapi64.dll` is on the Windows search path. The `xiapi-resolver` crate
//! installs a hook that knows the per-platform file names.

// Re-export libloading for handle and error types
pub use libloading;

mod error;
pub mod import;

pub use error::Error;
pub use import::{ModuleContext, SearchPolicy};

use libloading::Library;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Library file name the xiAPI interop declarations request.
pub const XIAPI_LIBRARY: &str = "xiapi64.dll";

/// Module context the xiAPI interop declarations load under.
pub static XIAPI_MODULE: ModuleContext = ModuleContext::new("xiapi");

static LIBRARY: OnceLock<&'static Library> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Load the xiAPI library on first use and return the process-wide handle.
///
/// Install a resolver hook (see `xiapi_resolver::init`) before the first
/// call; once a handle is cached the hook is no longer consulted. A failed
/// load is not cached and is retried on the next call.
pub fn library() -> Result<&'static Library, Error> {
    if let Some(lib) = LIBRARY.get() {
        return Ok(lib);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    // Double-check after acquiring lock
    if let Some(lib) = LIBRARY.get() {
        return Ok(lib);
    }

    let lib = import::load_import(XIAPI_LIBRARY, &XIAPI_MODULE, None)?;
    log::debug!("{} loaded", XIAPI_LIBRARY);

    Ok(LIBRARY.get_or_init(|| lib))
}

/// Try to get the xiAPI handle without attempting a load
pub fn try_library() -> Option<&'static Library> {
    LIBRARY.get().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xiapi_module() {
        assert_eq!(XIAPI_MODULE.name(), "xiapi");
        assert!(XIAPI_MODULE.directory().is_none());
    }

    #[test]
    fn test_library() {
        match library() {
            Ok(_) => assert!(try_library().is_some()),
            Err(e) => {
                println!("xiAPI not available: {}", e);
                assert!(try_library().is_none());
            }
        }
    }
}

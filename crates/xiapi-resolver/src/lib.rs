// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! xiAPI native library resolver
//!
//! The XIMEA xiAPI interop declarations request `xiapi64.dll` on every
//! platform. This crate installs a resolver hook for the xiAPI module that
//! maps that request onto the file names the SDK actually ships under on the
//! current host, and looks for them in three places:
//!
//! 1. the host loader's default search path,
//! 2. the directory containing the running executable,
//! 3. the directory named by the `XIMEA_NATIVE_PATH` environment variable.
//!
//! Requests for any other library are left alone.
//!
//! # Quick Start
//!
//! ```no_run
//! xiapi_resolver::init();
//!
//! let lib = xiapi_sys::library()?;
//! # let _ = lib;
//! # Ok::<(), xiapi_sys::Error>(())
//! ```
//!
//! [`init`] is idempotent and may be called from every entry point that
//! touches the SDK.

use std::sync::Once;

use xiapi_sys::{
    import, libloading::Library, Error, ModuleContext, SearchPolicy, XIAPI_LIBRARY, XIAPI_MODULE,
};

/// The host module describes the process a resolution runs in.
pub mod host;

/// The loader module wraps the host's loading primitives.
pub mod loader;

/// The platform module provides per-OS candidate file names.
pub mod platform;

/// The resolver module implements the tiered search.
pub mod resolver;

pub use host::{Host, ProcessHost, NATIVE_PATH_VAR};
pub use loader::{Loader, SystemLoader};
pub use platform::Platform;
pub use resolver::{is_target, Resolved, Resolver, Tier, TARGET_LIBRARY};

static INIT: Once = Once::new();

/// Install the xiAPI resolver hook.
///
/// Only the first call has any effect; later and concurrent calls return
/// once registration is complete. When the host import layer is built
/// without hook support this only logs, and the SDK resolves with the
/// host's default search.
pub fn init() {
    init_once(&INIT, register);
}

/// Whether [`init`] has run.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

fn init_once(once: &Once, register: impl FnOnce()) {
    once.call_once(register);
}

fn register() {
    if !import::hooks_supported() {
        log::debug!(
            "import hooks unsupported, {} resolves with host defaults",
            XIAPI_LIBRARY
        );
        return;
    }

    match import::set_import_resolver(&XIAPI_MODULE, resolve_import) {
        Ok(()) => log::debug!("xiAPI resolver installed"),
        Err(err) => log::warn!("xiAPI resolver not installed: {}", err),
    }
}

/// Resolver hook installed for [`XIAPI_MODULE`].
///
/// Runs [`Resolver::system`] and hands back the loaded library, or `None` to
/// let the import layer continue with its default handling.
pub fn resolve_import(
    name: &str,
    module: &ModuleContext,
    policy: Option<SearchPolicy>,
) -> Result<Option<&'static Library>, Error> {
    let resolved = Resolver::system().resolve(name, module, policy)?;

    Ok(resolved.map(|resolved| {
        match &resolved.path {
            Some(path) => log::info!("{} resolved to {}", name, path.display()),
            None => log::info!("{} resolved to {}", name, resolved.candidate),
        }
        resolved.handle
    }))
}

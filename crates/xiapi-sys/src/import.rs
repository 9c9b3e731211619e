// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Native import loading
//!
//! This module is the process-wide dynamic loading layer that interop
//! declarations go through. A declaration names a library file and the
//! module it belongs to; [`load_import`] turns that into a loaded
//! [`Library`] handle.
//!
//! Each module may register one [`ImportResolver`] hook with
//! [`set_import_resolver`]. When present, the hook is asked first and may
//! supply a handle, fail, or decline with `Ok(None)`. Declined requests fall
//! through to the host's default search ([`try_load`]).
//!
//! Loaded libraries are never unloaded: handles are `&'static Library` and
//! stay valid for the lifetime of the process.

use std::{
    collections::HashMap,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use libloading::Library;

use crate::Error;

bitflags::bitflags! {
    /// Directories the host loader searches for a named library.
    ///
    /// Bit values match the Windows `LOAD_LIBRARY_SEARCH_*` flags so they can
    /// be forwarded to `LoadLibraryExW` as-is. An empty policy selects the
    /// loader's legacy search order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SearchPolicy: u32 {
        /// Probe the requesting module's directory before anything else
        const MODULE_DIRECTORY = 0x0000_0002;
        /// Include the directory of the DLL being loaded for its dependencies
        const DLL_LOAD_DIRECTORY = 0x0000_0100;
        /// Include the application directory
        const APPLICATION_DIRECTORY = 0x0000_0200;
        /// Include directories added with `AddDllDirectory`
        const USER_DIRECTORIES = 0x0000_0400;
        /// Include `%windows%\system32`
        const SYSTEM32 = 0x0000_0800;
        /// Application, system32 and user directories
        const SAFE_DIRECTORIES = 0x0000_1000;
    }
}

/// Identifies the module whose interop declarations request a library.
///
/// The context is opaque to resolvers; they pass it back unchanged when
/// delegating to [`try_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    name: &'static str,
    directory: Option<PathBuf>,
}

impl ModuleContext {
    pub const fn new(name: &'static str) -> Self {
        ModuleContext {
            name,
            directory: None,
        }
    }

    /// Attach the directory the module was loaded from, used by
    /// [`SearchPolicy::MODULE_DIRECTORY`].
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

/// Resolver hook invoked by [`load_import`] for every library a module
/// requests.
///
/// Returns `Ok(Some(handle))` to supply a library, `Ok(None)` to defer to the
/// default search, or an error which is returned to the caller unchanged.
pub type ImportResolver = fn(
    name: &str,
    module: &ModuleContext,
    policy: Option<SearchPolicy>,
) -> Result<Option<&'static Library>, Error>;

/// Whether this build consults registered resolver hooks.
///
/// Controlled by the `import-hook` cargo feature. Without it, resolvers can
/// still be registered but every import goes straight to the host's default
/// search.
pub const fn hooks_supported() -> bool {
    cfg!(feature = "import-hook")
}

fn resolvers() -> MutexGuard<'static, HashMap<&'static str, ImportResolver>> {
    static RESOLVERS: OnceLock<Mutex<HashMap<&'static str, ImportResolver>>> = OnceLock::new();

    RESOLVERS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register the resolver hook for `module`.
///
/// Only one resolver may be registered per module name; a second call
/// returns [`Error::ResolverAlreadySet`] and leaves the first in place.
pub fn set_import_resolver(module: &ModuleContext, resolver: ImportResolver) -> Result<(), Error> {
    let mut resolvers = resolvers();
    if resolvers.contains_key(module.name()) {
        return Err(Error::ResolverAlreadySet(module.name().to_string()));
    }

    resolvers.insert(module.name(), resolver);
    log::debug!("import resolver registered for module '{}'", module.name());
    Ok(())
}

/// Load the library `name` on behalf of `module`.
///
/// The module's resolver hook runs first. If it defers, or none is
/// registered, the default search is used. Fails with [`Error::NotFound`]
/// when nothing produced a handle.
///
/// Results are not cached: every successful call maps a new, never released
/// handle, so repeated imports should go through a cached entry point such as
/// [`crate::library`].
pub fn load_import(
    name: &str,
    module: &ModuleContext,
    policy: Option<SearchPolicy>,
) -> Result<&'static Library, Error> {
    if hooks_supported() {
        // Copy the hook out so it runs without holding the registry lock.
        let resolver = resolvers().get(module.name()).copied();
        if let Some(resolver) = resolver {
            if let Some(lib) = resolver(name, module, policy)? {
                return Ok(lib);
            }
            log::debug!(
                "resolver for module '{}' deferred on '{}'",
                module.name(),
                name
            );
        }
    }

    try_load(name, module, policy).ok_or_else(|| Error::NotFound {
        name: name.to_string(),
    })
}

/// Find and load `name` using the host loader's normal search.
///
/// The name is tried verbatim, then in its platform-decorated form
/// (`libfoo.so`, `libfoo.dylib`, `foo.dll`) when it is a bare name without
/// an extension. With [`SearchPolicy::MODULE_DIRECTORY`] and a known module
/// directory, that directory is probed before each system lookup.
///
/// Every failure is treated the same and yields `None`.
pub fn try_load(
    name: &str,
    module: &ModuleContext,
    policy: Option<SearchPolicy>,
) -> Option<&'static Library> {
    let module_dir = policy
        .filter(|policy| policy.contains(SearchPolicy::MODULE_DIRECTORY))
        .and(module.directory());

    for candidate in search_names(name) {
        if let Some(dir) = module_dir {
            let path = dir.join(&candidate);
            match open(path.as_os_str(), policy) {
                Ok(lib) => return Some(leak(lib)),
                Err(err) => log::trace!("{}: {}", path.display(), err),
            }
        }

        match open(&candidate, policy) {
            Ok(lib) => return Some(leak(lib)),
            Err(err) => log::trace!("{}: {}", candidate.to_string_lossy(), err),
        }
    }

    None
}

/// Load the library file at `path`.
///
/// The returned handle is leaked and the library is never unloaded.
pub fn load(path: &Path) -> Result<&'static Library, Error> {
    // SAFETY: loading runs the library's initialisers; callers only point
    // this at SDK libraries they intend to call into.
    let lib = unsafe { Library::new(path) }.map_err(|source| Error::LoadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(leak(lib))
}

fn search_names(name: &str) -> Vec<OsString> {
    let mut names = vec![OsString::from(name)];

    let path = Path::new(name);
    if path.extension().is_none() && path.components().count() == 1 {
        let decorated = libloading::library_filename(name);
        if decorated != names[0] {
            names.push(decorated);
        }
    }

    names
}

#[cfg(windows)]
fn open(name: &OsStr, policy: Option<SearchPolicy>) -> Result<Library, libloading::Error> {
    let flags = policy.map_or(0, |policy| {
        policy.difference(SearchPolicy::MODULE_DIRECTORY).bits()
    });

    // SAFETY: see `load`.
    unsafe { libloading::os::windows::Library::load_with_flags(name, flags) }.map(Library::from)
}

#[cfg(not(windows))]
fn open(name: &OsStr, _policy: Option<SearchPolicy>) -> Result<Library, libloading::Error> {
    // SAFETY: see `load`.
    unsafe { Library::new(name) }
}

fn leak(lib: Library) -> &'static Library {
    Box::leak(Box::new(lib))
}

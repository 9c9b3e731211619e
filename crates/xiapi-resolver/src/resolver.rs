// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Tiered xiAPI library search
//!
//! [`Resolver::resolve`] answers a request for [`TARGET_LIBRARY`] by walking
//! the platform's candidate names through three tiers:
//!
//! 1. [`Tier::DefaultSearch`]: the host loader's own search. Failures are
//!    skipped.
//! 2. [`Tier::ApplicationDirectory`]: files next to the executable.
//! 3. [`Tier::NativePath`]: files in the directory named by
//!    [`NATIVE_PATH_VAR`](crate::NATIVE_PATH_VAR).
//!
//! In tiers 2 and 3 a file that exists but fails to load is an error; the
//! search stops there rather than moving on.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use xiapi_sys::{Error, ModuleContext, SearchPolicy};

use crate::{
    host::{Host, ProcessHost},
    loader::{Loader, SystemLoader},
};

/// The one library name this resolver answers for.
pub const TARGET_LIBRARY: &str = xiapi_sys::XIAPI_LIBRARY;

/// Whether `name` is a request for the xiAPI library (ASCII case-insensitive).
pub fn is_target(name: &str) -> bool {
    name.eq_ignore_ascii_case(TARGET_LIBRARY)
}

/// Where a library was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    DefaultSearch,
    ApplicationDirectory,
    NativePath,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::DefaultSearch => "default-search",
            Tier::ApplicationDirectory => "application-directory",
            Tier::NativePath => "native-path",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful resolution.
#[derive(Debug)]
pub struct Resolved<H> {
    pub handle: H,
    pub tier: Tier,
    /// Candidate name that produced the handle.
    pub candidate: &'static str,
    /// File loaded explicitly; `None` for the default search.
    pub path: Option<PathBuf>,
}

/// Resolves xiAPI library requests against a [`Host`] using a [`Loader`].
#[derive(Debug, Clone, Default)]
pub struct Resolver<L, H> {
    loader: L,
    host: H,
}

impl Resolver<SystemLoader, ProcessHost> {
    /// Resolver over the real process and host loader.
    pub fn system() -> Self {
        Resolver::new(SystemLoader, ProcessHost)
    }
}

impl<L: Loader, H: Host> Resolver<L, H> {
    pub fn new(loader: L, host: H) -> Self {
        Resolver { loader, host }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resolve a library request.
    ///
    /// Returns `Ok(None)` when `requested` is not [`TARGET_LIBRARY`] or no
    /// tier found a loadable file, leaving the caller to its default
    /// handling. `module` and `policy` are forwarded to the default search
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::LoadFailed`] when a candidate file exists in the application
    /// or fallback directory but cannot be loaded.
    pub fn resolve(
        &self,
        requested: &str,
        module: &ModuleContext,
        policy: Option<SearchPolicy>,
    ) -> Result<Option<Resolved<L::Handle>>, Error> {
        if !is_target(requested) {
            return Ok(None);
        }

        let platform = self.host.platform();
        let candidates = platform.candidates();
        log::debug!(
            "resolving {} on {} from {:?}",
            requested,
            platform,
            candidates
        );

        for &candidate in candidates {
            if let Some(handle) = self.loader.try_load(candidate, module, policy) {
                log::debug!("{} found by default search", candidate);
                return Ok(Some(Resolved {
                    handle,
                    tier: Tier::DefaultSearch,
                    candidate,
                    path: None,
                }));
            }
        }

        if let Some(dir) = self.host.base_directory() {
            if let Some(resolved) = self.load_from(&dir, candidates, Tier::ApplicationDirectory)? {
                return Ok(Some(resolved));
            }
        }

        if let Some(dir) = self.host.fallback_directory() {
            if let Some(resolved) = self.load_from(&dir, candidates, Tier::NativePath)? {
                return Ok(Some(resolved));
            }
        }

        log::debug!("{} not found, deferring to default resolution", requested);
        Ok(None)
    }

    fn load_from(
        &self,
        dir: &Path,
        candidates: &'static [&'static str],
        tier: Tier,
    ) -> Result<Option<Resolved<L::Handle>>, Error> {
        for &candidate in candidates {
            let path = dir.join(candidate);
            if !self.host.is_file(&path) {
                continue;
            }

            log::debug!("loading {} ({})", path.display(), tier);
            let handle = self.loader.load(&path)?;
            return Ok(Some(Resolved {
                handle,
                tier,
                candidate,
                path: Some(path),
            }));
        }

        Ok(None)
    }
}

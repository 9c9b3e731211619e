// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::path::Path;

use xiapi_sys::{import, libloading::Library, Error, ModuleContext, SearchPolicy};

/// The two loading primitives a resolution is built from.
pub trait Loader {
    /// Handle to a loaded library.
    type Handle;

    /// Find and load `name` with the host's normal search. Any failure,
    /// whether the library is missing or broken, is `None`.
    fn try_load(
        &self,
        name: &str,
        module: &ModuleContext,
        policy: Option<SearchPolicy>,
    ) -> Option<Self::Handle>;

    /// Load the file at `path`.
    fn load(&self, path: &Path) -> Result<Self::Handle, Error>;
}

/// Loads through the host import layer in `xiapi-sys`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

impl Loader for SystemLoader {
    type Handle = &'static Library;

    fn try_load(
        &self,
        name: &str,
        module: &ModuleContext,
        policy: Option<SearchPolicy>,
    ) -> Option<Self::Handle> {
        import::try_load(name, module, policy)
    }

    fn load(&self, path: &Path) -> Result<Self::Handle, Error> {
        import::load(path)
    }
}

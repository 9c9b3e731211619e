// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::Platform;

/// Environment variable naming the last-resort directory for the SDK files.
pub const NATIVE_PATH_VAR: &str = "XIMEA_NATIVE_PATH";

/// Read-only view of the host a resolution runs on.
pub trait Host {
    /// Operating system family, selecting the candidate names.
    fn platform(&self) -> Platform;

    /// Directory the running application was started from.
    fn base_directory(&self) -> Option<PathBuf>;

    /// Operator-configured fallback directory, if any.
    fn fallback_directory(&self) -> Option<PathBuf>;

    /// Whether `path` is an existing regular file. Directories do not count.
    fn is_file(&self, path: &Path) -> bool;
}

/// The real process: build target, executable location, process environment
/// and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHost;

impl Host for ProcessHost {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn base_directory(&self) -> Option<PathBuf> {
        match env::current_exe() {
            Ok(exe) => exe.parent().map(Path::to_path_buf),
            Err(err) => {
                log::debug!("application directory unavailable: {}", err);
                None
            }
        }
    }

    fn fallback_directory(&self) -> Option<PathBuf> {
        env::var_os(NATIVE_PATH_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

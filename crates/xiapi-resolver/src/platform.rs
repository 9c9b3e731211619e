// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::{fmt, str::FromStr};

const WINDOWS_CANDIDATES: &[&str] = &["xiapi64.dll", "xiapi32.dll", "xiapi.dll"];
const LINUX_CANDIDATES: &[&str] = &["libm3api.so", "m3api", "libxiapi.so"];
const MACOS_CANDIDATES: &[&str] = &["libm3api.dylib", "m3api", "libxiapi.dylib"];

/// Operating system family, which decides the xiAPI file names to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl Platform {
    /// The platform this binary was built for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    /// File names the SDK ships under on this platform, in the order they
    /// are tried.
    ///
    /// Windows installs carry 64-bit, 32-bit and neutral names. Linux and
    /// macOS carry the `m3api` library, its bare name for the loader's own
    /// decoration, and the older `xiapi` name. Other hosts have none.
    pub const fn candidates(self) -> &'static [&'static str] {
        match self {
            Platform::Windows => WINDOWS_CANDIDATES,
            Platform::Linux => LINUX_CANDIDATES,
            Platform::MacOs => MACOS_CANDIDATES,
            Platform::Other => &[],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown platform name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlatformError(String);

impl fmt::Display for ParsePlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown platform '{}' (expected windows, linux, macos or other)",
            self.0
        )
    }
}

impl std::error::Error for ParsePlatformError {}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" | "osx" | "darwin" => Ok(Platform::MacOs),
            "other" => Ok(Platform::Other),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

//! Host platform detection
//!
//! The catalog keys its builds by `<os>-<bits>`. Only the three desktop
//! majors are published as 64-bit builds we can use; anything else is an
//! error rather than a guess.

use crate::error::FetchError;
use std::fmt;
use std::str::FromStr;

/// Catalog key for a supported operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKey {
    Windows64,
    Linux64,
    Osx64,
}

impl PlatformKey {
    pub const ALL: [PlatformKey; 3] = [
        PlatformKey::Windows64,
        PlatformKey::Linux64,
        PlatformKey::Osx64,
    ];

    /// Map an OS identifier (as in `std::env::consts::OS`) to its catalog key.
    pub fn from_os(os: &str) -> Option<Self> {
        match os {
            "windows" => Some(PlatformKey::Windows64),
            "linux" => Some(PlatformKey::Linux64),
            "macos" => Some(PlatformKey::Osx64),
            _ => None,
        }
    }

    /// Catalog key of the running host.
    pub fn current() -> Result<Self, FetchError> {
        let os = std::env::consts::OS;
        Self::from_os(os).ok_or_else(|| FetchError::UnsupportedPlatform(os.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformKey::Windows64 => "windows-64",
            PlatformKey::Linux64 => "linux-64",
            PlatformKey::Osx64 => "osx-64",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKey {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FetchError::UnsupportedPlatform(s.to_string()))
    }
}

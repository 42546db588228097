use crate::error::ReleaseError;
use std::{fmt, str::FromStr};

/// Platforms served by the latest-build lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Mac, Platform::Linux];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
        }
    }

    /// Installer file-name suffix published for this platform.
    pub fn suffix(&self) -> &'static str {
        match self {
            Platform::Windows => "x64_en-US.msi",
            Platform::Mac => "x64.dmg",
            Platform::Linux => "amd64.AppImage",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ReleaseError::UnsupportedPlatform(s.to_string()))
    }
}

/// `os-arch` keys reported in an update descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    WindowsX86_64,
    DarwinX86_64,
    DarwinAarch64,
    LinuxX86_64,
}

impl Target {
    pub const ALL: [Target; 4] = [
        Target::WindowsX86_64,
        Target::DarwinX86_64,
        Target::DarwinAarch64,
        Target::LinuxX86_64,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Target::WindowsX86_64 => "windows-x86_64",
            Target::DarwinX86_64 => "darwin-x86_64",
            Target::DarwinAarch64 => "darwin-aarch64",
            Target::LinuxX86_64 => "linux-x86_64",
        }
    }

    /// Updater bundle suffix. Both macOS architectures share the universal
    /// `.app.tar.gz` bundle.
    pub fn suffix(&self) -> &'static str {
        match self {
            Target::WindowsX86_64 => "x64_en-US.msi.zip",
            Target::DarwinX86_64 | Target::DarwinAarch64 => "app.tar.gz",
            Target::LinuxX86_64 => "amd64.AppImage.tar.gz",
        }
    }

    pub fn signature_suffix(&self) -> String {
        format!("{}.sig", self.suffix())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

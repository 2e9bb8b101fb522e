//! The fixed set of prerequisite checks and their outcomes.

use std::fmt;
use std::path::PathBuf;

/// Registry key written by the Win64 OpenSSL installer.
pub const OPENSSL_UNINSTALL_KEY: &str =
    r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall\OpenSSL (64-bit)_is1";

/// Registry key holding the Steam client's install location.
pub const STEAM_KEY: &str = r"SOFTWARE\WOW6432Node\Valve\Steam";

/// String value under [`STEAM_KEY`] naming the install directory.
pub const STEAM_INSTALL_PATH_VALUE: &str = "InstallPath";

/// One prerequisite to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckSpec {
    /// `cmake` on PATH.
    BuildTool,
    /// 64-bit OpenSSL (full install).
    CryptoLibrary,
    /// .NET 6.0 SDK on PATH.
    Sdk,
    /// The Steam client; resolves its install path.
    HostApp,
    /// The Teardown game folder under the Steam install.
    TargetApp,
}

impl CheckSpec {
    /// All checks in the order they run.
    pub const ALL: [CheckSpec; 5] = [
        CheckSpec::BuildTool,
        CheckSpec::CryptoLibrary,
        CheckSpec::Sdk,
        CheckSpec::HostApp,
        CheckSpec::TargetApp,
    ];

    /// The default ordered check list.
    pub fn default_list() -> Vec<CheckSpec> {
        Self::ALL.to_vec()
    }

    /// Stable identifier, used in logs and summaries.
    pub fn id(&self) -> &'static str {
        match self {
            CheckSpec::BuildTool => "cmake",
            CheckSpec::CryptoLibrary => "openssl",
            CheckSpec::Sdk => "dotnet",
            CheckSpec::HostApp => "steam",
            CheckSpec::TargetApp => "teardown",
        }
    }

    /// Human-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            CheckSpec::BuildTool => "cmake",
            CheckSpec::CryptoLibrary => "OpenSSL",
            CheckSpec::Sdk => ".NET 6.0 SDK",
            CheckSpec::HostApp => "Steam",
            CheckSpec::TargetApp => "Teardown",
        }
    }

    /// Command line probed for tool checks.
    pub fn probe_command(&self) -> Option<&'static str> {
        match self {
            CheckSpec::BuildTool => Some("cmake --version"),
            CheckSpec::Sdk => Some("dotnet --version"),
            _ => None,
        }
    }

    /// Line printed when the check passes.
    pub fn found_message(&self) -> String {
        format!("{} found!", self.name())
    }

    /// Line printed when the check fails.
    pub fn missing_message(&self) -> String {
        match self {
            CheckSpec::HostApp => {
                format!("{} could not be found, please ensure it is installed.", self.name())
            }
            _ => format!("{} could not be found.", self.name()),
        }
    }

    /// What to install, and from where.
    pub fn remediation(&self) -> &'static str {
        match self {
            CheckSpec::BuildTool => {
                "Install cmake-3.23.0-windows-x86_64.msi from https://cmake.org/download/.\n\
                 Make sure you select to be included in your PATH!"
            }
            CheckSpec::CryptoLibrary => {
                "Install Win64 OpenSSL from https://slproweb.com/products/Win32OpenSSL.html.\n\
                 Make sure you install the full version (not the Light version)."
            }
            CheckSpec::Sdk => {
                "Install .NET 6.0 SDK from https://dotnet.microsoft.com/en-us/download/dotnet/6.0"
            }
            CheckSpec::HostApp => "Install Steam from https://store.steampowered.com/about/",
            CheckSpec::TargetApp => {
                "Install Teardown through Steam, or answer Yes and give its root directory."
            }
        }
    }
}

impl fmt::Display for CheckSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Result of evaluating one check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the prerequisite is present.
    pub passed: bool,

    /// Location discovered by the check, if any.
    ///
    /// Only the host-app check produces one; the target-app check reads it.
    pub resolved_path: Option<PathBuf>,
}

impl CheckOutcome {
    /// Passed, with nothing resolved.
    pub fn pass() -> Self {
        Self {
            passed: true,
            resolved_path: None,
        }
    }

    /// Failed.
    pub fn fail() -> Self {
        Self::default()
    }

    /// Passed, resolving `path`.
    pub fn resolved(path: PathBuf) -> Self {
        Self {
            passed: true,
            resolved_path: Some(path),
        }
    }

    /// Pass or fail from a boolean.
    pub fn from_bool(passed: bool) -> Self {
        Self {
            passed,
            resolved_path: None,
        }
    }
}

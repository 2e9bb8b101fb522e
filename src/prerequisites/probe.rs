//! Access to the machine being checked.
//!
//! [`SystemProbe`] is the seam between the checks and the host: commands,
//! registry and filesystem. [`HostProbe`] talks to the real machine.
//! Registry lookups only exist on Windows; elsewhere every key is absent.

use std::path::{Path, PathBuf};

use crate::shell::execute_check;

/// Read-only queries a prerequisite check can make.
pub trait SystemProbe {
    /// Run `command` through the platform interpreter; true on exit status 0.
    fn command_succeeds(&self, command: &str) -> bool;

    /// Whether `HKLM\<subkey>` opens with query access.
    fn registry_key_exists(&self, subkey: &str) -> bool;

    /// String value `name` of `HKLM\<subkey>`, if the key opens and the value is set.
    fn registry_string(&self, subkey: &str, name: &str) -> Option<String>;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Probe backed by the real machine.
#[derive(Debug, Clone, Default)]
pub struct HostProbe {
    cwd: Option<PathBuf>,
}

impl HostProbe {
    /// Create a probe running commands in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe running commands in `cwd`.
    pub fn in_dir(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
        }
    }
}

impl SystemProbe for HostProbe {
    fn command_succeeds(&self, command: &str) -> bool {
        let ok = execute_check(command, self.cwd.as_deref());
        tracing::debug!("Probe `{}` -> {}", command, ok);
        ok
    }

    #[cfg(windows)]
    fn registry_key_exists(&self, subkey: &str) -> bool {
        use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE};
        use winreg::RegKey;

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        match hklm.open_subkey_with_flags(subkey, KEY_QUERY_VALUE) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Registry key HKLM\\{} not opened: {}", subkey, e);
                false
            }
        }
    }

    #[cfg(not(windows))]
    fn registry_key_exists(&self, subkey: &str) -> bool {
        tracing::debug!("No registry on this platform, HKLM\\{} treated as absent", subkey);
        false
    }

    #[cfg(windows)]
    fn registry_string(&self, subkey: &str, name: &str) -> Option<String> {
        use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE};
        use winreg::RegKey;

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let value = hklm
            .open_subkey_with_flags(subkey, KEY_QUERY_VALUE)
            .and_then(|key| key.get_value::<String, _>(name));

        match value {
            Ok(v) if !v.is_empty() => Some(v),
            Ok(_) => {
                tracing::debug!("Registry value HKLM\\{}\\{} is empty", subkey, name);
                None
            }
            Err(e) => {
                tracing::debug!("Registry value HKLM\\{}\\{} not read: {}", subkey, name, e);
                None
            }
        }
    }

    #[cfg(not(windows))]
    fn registry_string(&self, subkey: &str, name: &str) -> Option<String> {
        tracing::debug!(
            "No registry on this platform, HKLM\\{}\\{} treated as absent",
            subkey,
            name
        );
        None
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

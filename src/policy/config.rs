use std::env;
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

use super::types::{MountFlow, Probe, Sources, Verbosity};

/// Policy governs where targets come from and how each target is probed and mounted.
///
/// Built once (the binary builds it from flags) and passed by reference into the
/// loader, the probe and the orchestrator.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    pub verbosity: Verbosity,
    pub probe: Probe,
    pub mount: MountFlow,
    pub sources: Sources,
}

impl Policy {
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_probe_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.probe.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_mount_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.mount.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_mount_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.mount.program = program.into();
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.config_path = path.into();
        self
    }

    #[must_use]
    pub fn with_mountinfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.mountinfo_path = path.into();
        self
    }
}

/// `$XDG_CONFIG_HOME/netmount/netmount.conf`, else `$HOME/.config/netmount/netmount.conf`,
/// else a path relative to the working directory.
pub fn default_config_path() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_default();
    base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

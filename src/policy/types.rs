use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_PROBE_TIMEOUT_MS, MOUNTINFO_PATH, MOUNT_PROGRAM};

/// Whether raw diagnostics or generic messages are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
}

impl Verbosity {
    pub const fn is_verbose(self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

impl From<bool> for Verbosity {
    fn from(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }
}

#[derive(Clone, Debug)]
pub struct Probe {
    pub timeout_ms: u64,
}

impl Default for Probe {
    fn default() -> Self {
        Self { timeout_ms: DEFAULT_PROBE_TIMEOUT_MS }
    }
}

impl Probe {
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Clone, Debug)]
pub struct MountFlow {
    pub program: PathBuf,
    /// `None` waits on the mount program indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for MountFlow {
    fn default() -> Self {
        Self { program: PathBuf::from(MOUNT_PROGRAM), timeout_ms: None }
    }
}

impl MountFlow {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Clone, Debug)]
pub struct Sources {
    pub config_path: PathBuf,
    pub mountinfo_path: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            config_path: super::config::default_config_path(),
            mountinfo_path: PathBuf::from(MOUNTINFO_PATH),
        }
    }
}

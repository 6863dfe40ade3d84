use serde::Serialize;
use std::path::{Path, PathBuf};

/// One declared remote-filesystem-to-local-path mapping.
///
/// Built once by the validator and never mutated afterwards. `name` identifies the
/// target in the report; nothing enforces uniqueness of `local_path` or `host`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MountTarget {
    pub name: String,
    pub local_path: PathBuf,
    pub host: String,
    /// `None` when no port is known; such targets are reported as `NoPort` without probing.
    pub port: Option<u16>,
}

impl MountTarget {
    pub fn new(
        name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            host: host.into(),
            port: Some(port),
        }
    }

    /// Target without a probe port.
    pub fn without_port(
        name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            host: host.into(),
            port: None,
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }
}

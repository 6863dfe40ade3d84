use serde::Serialize;

/// Terminal result of one target's task. Exactly one exists per target once a run completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MountOutcome {
    /// Local path already present in the mounted-set snapshot; nothing was probed or mounted.
    AlreadyMounted,
    /// No port to probe.
    NoPort,
    /// Probe failed; carries the probe diagnostic.
    Unreachable(String),
    /// The mount program failed; carries its trimmed combined output.
    MountFailed(String),
    MountSucceeded,
}

impl MountOutcome {
    /// Stable identifier used in facts and counters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MountOutcome::AlreadyMounted => "already_mounted",
            MountOutcome::NoPort => "no_port",
            MountOutcome::Unreachable(_) => "unreachable",
            MountOutcome::MountFailed(_) => "mount_failed",
            MountOutcome::MountSucceeded => "mounted",
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            MountOutcome::Unreachable(d) | MountOutcome::MountFailed(d) => Some(d.as_str()),
            _ => None,
        }
    }
}

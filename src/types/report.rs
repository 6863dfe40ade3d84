use serde::Serialize;
use std::path::PathBuf;

use super::outcome::MountOutcome;

/// One row of a run report.
#[derive(Clone, Debug, Serialize)]
pub struct TargetReport {
    pub name: String,
    pub local_path: PathBuf,
    pub outcome: MountOutcome,
    pub duration_ms: u64,
}

/// Aggregated result of a run. `rows` are sorted by `(name, local_path)`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub rows: Vec<TargetReport>,
    pub duration_ms: u64,
}

/// Count of rows per outcome kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub already_mounted: usize,
    pub no_port: usize,
    pub unreachable: usize,
    pub mount_failed: usize,
    pub mounted: usize,
}

impl RunReport {
    #[must_use]
    pub fn counts(&self) -> OutcomeCounts {
        let mut c = OutcomeCounts::default();
        for row in &self.rows {
            match row.outcome {
                MountOutcome::AlreadyMounted => c.already_mounted += 1,
                MountOutcome::NoPort => c.no_port += 1,
                MountOutcome::Unreachable(_) => c.unreachable += 1,
                MountOutcome::MountFailed(_) => c.mount_failed += 1,
                MountOutcome::MountSucceeded => c.mounted += 1,
            }
        }
        c
    }

    pub fn outcome_of(&self, name: &str) -> Option<&MountOutcome> {
        self.rows.iter().find(|r| r.name == name).map(|r| &r.outcome)
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }
}

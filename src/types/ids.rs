//! Deterministic UUIDv5 identifiers for runs and targets.
//!
//! The namespace is derived from `NS_TAG` so that `run_id` and `target_id` are
//! reproducible across runs for the same validated target list.
use std::fmt::Write;
use uuid::Uuid;

use super::target::MountTarget;
use crate::constants::NS_TAG;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

fn serialize_target(t: &MountTarget) -> String {
    let port = t.port.map(|p| p.to_string()).unwrap_or_default();
    format!(
        "{}|{}|{}|{}",
        t.name,
        t.local_path.to_string_lossy(),
        t.host,
        port
    )
}

/// Deterministic id for a run over `targets`, in config order.
#[must_use]
pub fn run_id(targets: &[MountTarget]) -> Uuid {
    let mut s = String::new();
    for t in targets {
        s.push_str(&serialize_target(t));
        s.push('\n');
    }
    Uuid::new_v5(&namespace(), s.as_bytes())
}

/// Deterministic id for the target at `idx` within a run.
#[must_use]
pub fn target_id(run_id: &Uuid, target: &MountTarget, idx: usize) -> Uuid {
    let mut s = serialize_target(target);
    let _ = write!(s, "#{idx}");
    Uuid::new_v5(run_id, s.as_bytes())
}

//! Run stage: concurrent per-target tasks, join, then a single-threaded reduction.
//!
//! Side-effects:
//! - Spawns one scoped thread per target; tasks only return values.
//! - After the join, emits `probe`, `mount` and `target.result` facts per target in
//!   report order, then one `run.summary` fact.
//! - Returns a `RunReport` whose rows are sorted by target name.

use std::thread;
use std::time::Instant;

use log::Level;
use serde_json::json;

use crate::adapters::{MountExecutor, ReachabilityProbe};
use crate::fs::MountedSet;
use crate::logging::{now_iso, AuditCtx, AuditMode, AuditSink, FactsEmitter, StageLogger};
use crate::policy::Policy;
use crate::types::ids::{run_id, target_id};
use crate::types::{MountOutcome, MountTarget, RunReport, TargetReport};

use super::Netmount;

/// What one task hands back to the reduction step.
#[derive(Debug)]
pub(crate) struct TaskResult {
    pub outcome: MountOutcome,
    pub probe_ms: Option<u64>,
    pub mount_ms: Option<u64>,
    pub duration_ms: u64,
}

impl TaskResult {
    fn panicked() -> Self {
        Self {
            outcome: MountOutcome::MountFailed("task panicked".to_string()),
            probe_ms: None,
            mount_ms: None,
            duration_ms: 0,
        }
    }
}

fn elapsed_ms(t0: Instant) -> u64 {
    u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Decision order for one target: mounted-check, port, probe, mount.
pub(crate) fn decide(
    target: &MountTarget,
    snapshot: &MountedSet,
    probe: &dyn ReachabilityProbe,
    executor: &dyn MountExecutor,
    policy: &Policy,
) -> TaskResult {
    let t0 = Instant::now();
    let mut res = TaskResult {
        outcome: MountOutcome::MountSucceeded,
        probe_ms: None,
        mount_ms: None,
        duration_ms: 0,
    };
    if snapshot.contains(target.local_path()) {
        res.outcome = MountOutcome::AlreadyMounted;
    } else if let Some(port) = target.port {
        let p0 = Instant::now();
        let probed = probe.probe(&target.host, port, policy.probe.timeout());
        res.probe_ms = Some(elapsed_ms(p0));
        match probed {
            Err(e) => {
                log::debug!("{}: {} unreachable: {e}", target.name, target.host);
                res.outcome = MountOutcome::Unreachable(e.to_string());
            }
            Ok(()) => {
                let m0 = Instant::now();
                let mounted = executor.mount(target.local_path());
                res.mount_ms = Some(elapsed_ms(m0));
                if let Err(e) = mounted {
                    log::debug!("{}: mount {} failed: {e}", target.name, target.local_path.display());
                    res.outcome = MountOutcome::MountFailed(e.to_string());
                }
            }
        }
    } else {
        res.outcome = MountOutcome::NoPort;
    }
    res.duration_ms = elapsed_ms(t0);
    res
}

pub(crate) fn run<E: FactsEmitter, A: AuditSink>(
    api: &Netmount<E, A>,
    targets: &[MountTarget],
    snapshot: &MountedSet,
) -> RunReport {
    let t0 = Instant::now();
    let rid = run_id(targets);
    let probe: &dyn ReachabilityProbe = api.probe.as_ref();
    let executor: &dyn MountExecutor = api.executor.as_ref();
    let policy = &api.policy;

    let results: Vec<TaskResult> = thread::scope(|s| {
        let handles: Vec<_> = targets
            .iter()
            .map(|t| {
                thread::Builder::new()
                    .name(format!("netmount-{}", t.name))
                    .spawn_scoped(s, move || decide(t, snapshot, probe, executor, policy))
                    .map_err(|e| {
                        log::warn!("{}: could not spawn task ({e}); running inline", t.name);
                    })
            })
            .collect();
        handles
            .into_iter()
            .zip(targets)
            .map(|(h, t)| match h {
                Ok(h) => h.join().unwrap_or_else(|_| TaskResult::panicked()),
                Err(()) => decide(t, snapshot, probe, executor, policy),
            })
            .collect()
    });

    // Join barrier passed: everything below is single-threaded.
    let mut rows: Vec<(usize, &MountTarget, TaskResult)> = targets
        .iter()
        .zip(results)
        .enumerate()
        .map(|(idx, (t, r))| (idx, t, r))
        .collect();
    rows.sort_by(|a, b| {
        a.1.name
            .cmp(&b.1.name)
            .then_with(|| a.1.local_path.cmp(&b.1.local_path))
    });

    let ctx = AuditCtx::new(&api.facts, rid.to_string(), now_iso(), AuditMode::default());
    let slog = StageLogger::new(&ctx);
    let mut report = RunReport {
        run_id: rid.to_string(),
        rows: Vec::with_capacity(rows.len()),
        duration_ms: 0,
    };
    for (idx, t, r) in rows {
        let tid = target_id(&rid, t, idx).to_string();
        let path = t.local_path.display().to_string();
        if let Some(ms) = r.probe_ms {
            let evt = slog
                .probe()
                .target(t.name.clone(), tid.clone())
                .path(path.clone())
                .field("host", json!(t.host))
                .field("port", json!(t.port))
                .field("duration_ms", json!(ms));
            match &r.outcome {
                MountOutcome::Unreachable(reason) => {
                    evt.field("reason", json!(reason)).emit_failure();
                }
                _ => evt.emit_success(),
            }
        }
        if let Some(ms) = r.mount_ms {
            let evt = slog
                .mount()
                .target(t.name.clone(), tid.clone())
                .path(path.clone())
                .field("program", json!(policy.mount.program.display().to_string()))
                .field("duration_ms", json!(ms));
            match &r.outcome {
                MountOutcome::MountFailed(diag) => {
                    evt.field("diagnostic", json!(diag)).emit_failure();
                }
                _ => evt.emit_success(),
            }
        }
        let evt = slog
            .target_result()
            .target(t.name.clone(), tid)
            .path(path)
            .field("outcome", json!(r.outcome.as_str()))
            .field("detail", json!(r.outcome.detail()))
            .field("duration_ms", json!(r.duration_ms));
        match r.outcome {
            MountOutcome::Unreachable(_) | MountOutcome::MountFailed(_) => evt.emit_failure(),
            MountOutcome::NoPort => evt.emit_warn(),
            _ => evt.emit_success(),
        }
        report.rows.push(TargetReport {
            name: t.name.clone(),
            local_path: t.local_path.clone(),
            outcome: r.outcome,
            duration_ms: r.duration_ms,
        });
    }

    report.duration_ms = elapsed_ms(t0);
    let counts = report.counts();
    slog.run_summary()
        .field("targets", json!(report.rows.len()))
        .field("counts", json!(counts))
        .field("duration_ms", json!(report.duration_ms))
        .emit_success();
    api.audit.log(
        Level::Info,
        &format!(
            "run {}: {} target(s), {} mounted, {} already mounted, {} unreachable, {} failed, {} without port",
            report.run_id,
            report.rows.len(),
            counts.mounted,
            counts.already_mounted,
            counts.unreachable,
            counts.mount_failed,
            counts.no_port
        ),
    );
    report
}

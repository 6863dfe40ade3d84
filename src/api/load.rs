//! Pre-run stages: config loading, validation and the mounted-set snapshot.
//!
//! Side-effects:
//! - Emits one `load` fact (success with the target count, failure with the error id).
//! - Emits one `snapshot` fact.
//! - Writes an audit line for every fatal error.

use std::path::Path;

use log::Level;
use serde_json::json;

use crate::config::{read_records, validate, ConfigSource};
use crate::fs::MountedSet;
use crate::logging::{now_iso, AuditCtx, AuditMode, AuditSink, FactsEmitter, Stage, StageLogger};
use crate::types::ids::run_id;
use crate::types::{MountTarget, ValidationFailure};

use super::errors::{id_str, ApiError};
use super::Netmount;

pub(crate) fn from_file<E: FactsEmitter, A: AuditSink>(
    api: &Netmount<E, A>,
    path: &Path,
) -> Result<Vec<MountTarget>, ApiError> {
    let source = match read_records(path) {
        Ok(s) => s,
        Err(e) => {
            let err = ApiError::ConfigUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
            fail(api, Stage::Load, String::new(), &path.display().to_string(), &err);
            return Err(err);
        }
    };
    from_source(api, source)
}

pub(crate) fn from_source<E: FactsEmitter, A: AuditSink>(
    api: &Netmount<E, A>,
    source: ConfigSource,
) -> Result<Vec<MountTarget>, ApiError> {
    let config_path = api.policy.sources.config_path.display().to_string();
    match validate(&source.records) {
        Ok(targets) if targets.is_empty() => {
            let err = ApiError::NothingToMount;
            fail(api, Stage::Load, String::new(), &config_path, &err);
            Err(err)
        }
        Ok(targets) => {
            let rid = run_id(&targets).to_string();
            let ctx = AuditCtx::new(&api.facts, rid, now_iso(), AuditMode::default());
            StageLogger::new(&ctx)
                .load()
                .path(config_path)
                .field("targets", json!(targets.len()))
                .emit_success();
            Ok(targets)
        }
        Err(errors) => {
            for e in &errors {
                api.audit.log(Level::Debug, &format!("config line {e}"));
            }
            let err = ApiError::Validation(ValidationFailure {
                errors,
                listing: source.listing,
            });
            fail(api, Stage::Load, String::new(), &config_path, &err);
            Err(err)
        }
    }
}

pub(crate) fn snapshot<E: FactsEmitter, A: AuditSink>(
    api: &Netmount<E, A>,
    targets: &[MountTarget],
) -> Result<MountedSet, ApiError> {
    let rid = run_id(targets).to_string();
    let path = &api.policy.sources.mountinfo_path;
    match MountedSet::capture(path) {
        Ok(set) => {
            if set.is_empty() {
                api.audit.log(
                    Level::Warn,
                    &format!("mounted-set file {} is empty; no target counts as mounted", path.display()),
                );
            }
            let ctx = AuditCtx::new(&api.facts, rid, now_iso(), AuditMode::default());
            StageLogger::new(&ctx)
                .snapshot()
                .path(path.display().to_string())
                .field("mount_points", json!(set.mount_points().len()))
                .emit_success();
            Ok(set)
        }
        Err(e) => {
            let err = ApiError::MountInfoUnavailable {
                path: path.clone(),
                reason: e.to_string(),
            };
            fail(api, Stage::Snapshot, rid, &path.display().to_string(), &err);
            Err(err)
        }
    }
}

/// Audit line plus failure fact for a fatal stage error. Load failures carry an
/// empty `run_id`: no validated target list exists to derive one from.
fn fail<E: FactsEmitter, A: AuditSink>(
    api: &Netmount<E, A>,
    stage: Stage,
    rid: String,
    path: &str,
    err: &ApiError,
) {
    api.audit.log(Level::Error, &err.to_string());
    let ctx = AuditCtx::new(&api.facts, rid, now_iso(), AuditMode::default());
    let slog = StageLogger::new(&ctx);
    let mut evt = slog
        .stage(stage)
        .path(path)
        .field("error_id", json!(id_str(err.id())))
        .field("exit_code", json!(err.exit_code()));
    if let ApiError::Validation(f) = err {
        evt = evt.field("invalid_lines", json!(f.errors.iter().map(|e| e.line).collect::<Vec<_>>()));
    }
    evt.emit_failure();
}

// Stage facts for a netmount run.
//
// Every fact carries a minimal envelope: `schema_version`, `ts`, `run_id`, `path`.
// Redaction (zeroed `ts`, no timing fields) applies when `AuditMode::redact` is set.
use crate::logging::{redact_event, FactsEmitter};
use serde_json::{json, Value};

pub(crate) const SCHEMA_VERSION: i64 = 1;
const SUBSYSTEM: &str = "netmount";

#[derive(Clone, Debug, Default)]
pub struct AuditMode {
    pub redact: bool,
}

pub struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub run_id: String,
    pub ts: String,
    pub mode: AuditMode,
}

impl<'a> AuditCtx<'a> {
    pub fn new(facts: &'a dyn FactsEmitter, run_id: String, ts: String, mode: AuditMode) -> Self {
        Self {
            facts,
            run_id,
            ts,
            mode,
        }
    }
}

/// Stage for typed audit emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Load,
    Snapshot,
    Probe,
    Mount,
    TargetResult,
    RunSummary,
}

impl Stage {
    pub const fn as_event(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Snapshot => "snapshot",
            Stage::Probe => "probe",
            Stage::Mount => "mount",
            Stage::TargetResult => "target.result",
            Stage::RunSummary => "run.summary",
        }
    }
}

/// Decision severity for audit events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

/// Builder facade over fact emission with centralized envelope and redaction.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub fn new(ctx: &'a AuditCtx<'a>) -> Self { Self { ctx } }

    pub fn stage(&'a self, stage: Stage) -> EventBuilder<'a> { EventBuilder::new(self.ctx, stage) }
    pub fn load(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Load) }
    pub fn snapshot(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Snapshot) }
    pub fn probe(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Probe) }
    pub fn mount(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Mount) }
    pub fn target_result(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::TargetResult) }
    pub fn run_summary(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::RunSummary) }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    pub fn target(mut self, name: impl Into<String>, target_id: impl Into<String>) -> Self {
        self.fields.insert("target".into(), json!(name.into()));
        self.fields.insert("target_id".into(), json!(target_id.into()));
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.fields.insert("path".into(), json!(path.into()));
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = Value::Object(self.fields);
        if let Some(obj) = fields.as_object_mut() {
            obj.entry("decision").or_insert(json!(decision.as_str()));
        }
        redact_and_emit(self.ctx, self.stage.as_event(), decision.as_str(), fields);
    }

    pub fn emit_success(self) { self.emit(Decision::Success) }
    pub fn emit_failure(self) { self.emit(Decision::Failure) }
    pub fn emit_warn(self) { self.emit(Decision::Warn) }
}

fn redact_and_emit(ctx: &AuditCtx, event: &str, decision: &str, mut fields: Value) {
    if let Some(obj) = fields.as_object_mut() {
        obj.entry("schema_version").or_insert(json!(SCHEMA_VERSION));
        obj.entry("ts").or_insert(json!(ctx.ts));
        obj.entry("run_id").or_insert(json!(ctx.run_id));
        obj.entry("path").or_insert(json!(""));
    }
    let out = if ctx.mode.redact {
        redact_event(fields)
    } else {
        fields
    };
    ctx.facts.emit(SUBSYSTEM, event, decision, out);
}

use log::Level;
use serde_json::{json, Value};

pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

pub trait AuditSink {
    fn log(&self, level: Level, msg: &str);
}

/// Discards everything.
#[derive(Default, Debug, Clone, Copy)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}

impl AuditSink for JsonlSink {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Forwards facts (as one JSON object per line, at debug level) and audit lines to
/// the `log` facade.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogSink;

impl FactsEmitter for LogSink {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        let line = json!({
            "subsystem": subsystem,
            "event": event,
            "decision": decision,
            "fields": fields,
        });
        log::debug!(target: "netmount::facts", "{line}");
    }
}

impl AuditSink for LogSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "netmount::audit", level, "{msg}");
    }
}

pub mod audit;
pub mod facts;
pub mod redact;

pub use audit::{AuditCtx, AuditMode, Decision, EventBuilder, Stage, StageLogger};
pub use facts::{AuditSink, FactsEmitter, JsonlSink, LogSink};
pub use redact::{now_iso, redact_event, TS_ZERO};

// Facade for API module; delegates to submodules under src/api/

use crate::adapters::{CommandMounter, MountExecutor, ReachabilityProbe, TcpProbe};
use crate::fs::MountedSet;
use crate::logging::{AuditSink, FactsEmitter};
use crate::policy::Policy;
use crate::types::{MountTarget, RunReport};

#[path = "api/builder.rs"]
mod builder;
#[path = "api/errors.rs"]
pub mod errors;
#[path = "api/load.rs"]
mod load;
#[path = "api/orchestrate.rs"]
mod orchestrate;
#[path = "api/render.rs"]
pub mod render;

pub use builder::ApiBuilder;

pub struct Netmount<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    probe: Box<dyn ReachabilityProbe>,
    executor: Box<dyn MountExecutor>,
}

impl<E: FactsEmitter, A: AuditSink> Netmount<E, A> {
    /// Production wiring: TCP probe and the policy's mount program.
    pub fn new(facts: E, audit: A, policy: Policy) -> Self {
        let executor = CommandMounter::new(policy.mount.program.clone())
            .with_timeout(policy.mount.timeout());
        Self {
            facts,
            audit,
            policy,
            probe: Box::new(TcpProbe::default()),
            executor: Box::new(executor),
        }
    }

    pub fn with_probe(mut self, probe: Box<dyn ReachabilityProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_executor(mut self, executor: Box<dyn MountExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Read and validate the configured target list.
    pub fn load(&self) -> Result<Vec<MountTarget>, errors::ApiError> {
        load::from_file(self, &self.policy.sources.config_path)
    }

    /// Validate targets from config text already in memory.
    pub fn load_str(&self, content: &str) -> Result<Vec<MountTarget>, errors::ApiError> {
        load::from_source(self, crate::config::parse_records(content))
    }

    /// Capture the mounted-set file once for a run over `targets`.
    pub fn snapshot(&self, targets: &[MountTarget]) -> Result<MountedSet, errors::ApiError> {
        load::snapshot(self, targets)
    }

    /// Run every target concurrently against `snapshot` and return the sorted report.
    pub fn run(&self, targets: &[MountTarget], snapshot: &MountedSet) -> RunReport {
        orchestrate::run(self, targets, snapshot)
    }

    /// `load`, then `snapshot`, then `run`. Fatal errors stop before any task starts.
    pub fn execute(&self) -> Result<RunReport, errors::ApiError> {
        let targets = self.load()?;
        let snapshot = self.snapshot(&targets)?;
        Ok(self.run(&targets, &snapshot))
    }

    /// Report lines for `report` under this instance's verbosity.
    pub fn render(&self, report: &RunReport) -> String {
        render::render_report(report, self.policy.verbosity)
    }
}

use crate::adapters::{MountExecutor, ReachabilityProbe};
use crate::logging::{AuditSink, FactsEmitter};
use crate::policy::Policy;

/// Builder for constructing a Netmount with ergonomic chaining.
/// Mirrors `Netmount::new(...).with_*` but avoids duplication at call sites.
pub struct ApiBuilder<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    probe: Option<Box<dyn ReachabilityProbe>>,
    executor: Option<Box<dyn MountExecutor>>,
}

impl<E: FactsEmitter, A: AuditSink> ApiBuilder<E, A> {
    pub fn new(facts: E, audit: A, policy: Policy) -> Self {
        Self { facts, audit, policy, probe: None, executor: None }
    }

    pub fn probe(mut self, probe: Box<dyn ReachabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn executor(mut self, executor: Box<dyn MountExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn build(self) -> super::Netmount<E, A> {
        let mut api = super::Netmount::new(self.facts, self.audit, self.policy);
        if let Some(p) = self.probe {
            api = api.with_probe(p);
        }
        if let Some(x) = self.executor {
            api = api.with_executor(x);
        }
        api
    }
}

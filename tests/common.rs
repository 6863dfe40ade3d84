//! Shared test helpers for the netmount integration tests.
#![allow(dead_code)]

use log::Level;
use serde_json::Value;
use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use netmount::adapters::{MountExecutor, ReachabilityProbe};
use netmount::logging::{AuditSink, FactsEmitter};
use netmount::types::errors::{Error, ErrorKind, Result};

/// A simple in-memory emitter to capture facts during tests.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((subsystem.into(), event.into(), decision.into(), fields));
    }
}

impl TestEmitter {
    pub fn of_event(&self, event: &str) -> Vec<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, e, _, _)| e == event)
            .map(|(_, _, _, f)| f.clone())
            .collect()
    }
}

/// A no-op audit sink for tests.
#[derive(Clone, Default)]
pub struct TestAudit;

impl AuditSink for TestAudit {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Random delay in `0..max_ms`, different on every call.
pub fn jitter(max_ms: u64) -> Duration {
    let mut h = RandomState::new().build_hasher();
    h.write_u64(max_ms);
    Duration::from_millis(h.finish() % max_ms.max(1))
}

#[derive(Default)]
struct ProbeState {
    calls: AtomicUsize,
    hosts: Mutex<Vec<String>>,
    timeouts: Mutex<Vec<Duration>>,
    down: HashSet<String>,
    hanging: HashSet<String>,
    max_jitter_ms: u64,
}

/// Probe double: every host is reachable unless marked down (refused) or hanging
/// (sleeps for the full timeout, then times out).
#[derive(Clone, Default)]
pub struct FakeProbe {
    state: Arc<ProbeState>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FakeProbeBuilder {
        FakeProbeBuilder::default()
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn probed_hosts(&self) -> Vec<String> {
        self.state.hosts.lock().unwrap().clone()
    }

    pub fn timeouts(&self) -> Vec<Duration> {
        self.state.timeouts.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct FakeProbeBuilder {
    state: ProbeState,
}

impl FakeProbeBuilder {
    pub fn down(mut self, host: &str) -> Self {
        self.state.down.insert(host.to_string());
        self
    }

    pub fn hanging(mut self, host: &str) -> Self {
        self.state.hanging.insert(host.to_string());
        self
    }

    pub fn jitter_ms(mut self, max: u64) -> Self {
        self.state.max_jitter_ms = max;
        self
    }

    pub fn build(self) -> FakeProbe {
        FakeProbe { state: Arc::new(self.state) }
    }
}

impl ReachabilityProbe for FakeProbe {
    fn probe(&self, host: &str, port: u16, timeout: Duration) -> Result<()> {
        let s = &self.state;
        s.calls.fetch_add(1, Ordering::SeqCst);
        s.hosts.lock().unwrap().push(host.to_string());
        s.timeouts.lock().unwrap().push(timeout);
        if s.max_jitter_ms > 0 {
            std::thread::sleep(jitter(s.max_jitter_ms));
        }
        if s.hanging.contains(host) {
            std::thread::sleep(timeout);
            return Err(Error::new(ErrorKind::Timeout, format!("dial tcp {host}:{port}: i/o timeout")));
        }
        if s.down.contains(host) {
            return Err(Error::new(ErrorKind::Refused, format!("dial tcp {host}:{port}: connection refused")));
        }
        Ok(())
    }
}

#[derive(Default)]
struct MounterState {
    mounted: Mutex<Vec<PathBuf>>,
    failing: HashMap<PathBuf, String>,
    mountinfo: Option<PathBuf>,
    max_jitter_ms: u64,
}

/// Mount double: records every call; optionally appends a mountinfo line per success
/// so a later snapshot sees the mount.
#[derive(Clone, Default)]
pub struct FakeMounter {
    state: Arc<MounterState>,
}

impl FakeMounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FakeMounterBuilder {
        FakeMounterBuilder::default()
    }

    pub fn calls(&self) -> usize {
        self.state.mounted.lock().unwrap().len()
    }

    pub fn mounted(&self) -> Vec<PathBuf> {
        self.state.mounted.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct FakeMounterBuilder {
    state: MounterState,
}

impl FakeMounterBuilder {
    pub fn failing(mut self, path: impl Into<PathBuf>, diag: &str) -> Self {
        self.state.failing.insert(path.into(), diag.to_string());
        self
    }

    pub fn record_into(mut self, mountinfo: impl Into<PathBuf>) -> Self {
        self.state.mountinfo = Some(mountinfo.into());
        self
    }

    pub fn jitter_ms(mut self, max: u64) -> Self {
        self.state.max_jitter_ms = max;
        self
    }

    pub fn build(self) -> FakeMounter {
        FakeMounter { state: Arc::new(self.state) }
    }
}

impl MountExecutor for FakeMounter {
    fn mount(&self, local_path: &Path) -> Result<()> {
        let s = &self.state;
        s.mounted.lock().unwrap().push(local_path.to_path_buf());
        if s.max_jitter_ms > 0 {
            std::thread::sleep(jitter(s.max_jitter_ms));
        }
        if let Some(diag) = s.failing.get(local_path) {
            return Err(Error::new(ErrorKind::Io, diag.clone()));
        }
        if let Some(info) = &s.mountinfo {
            let mut f = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(info)
                .map_err(|e| Error::new(ErrorKind::Io, e.to_string()))?;
            writeln!(f, "99 22 0:99 / {} rw,relatime - nfs4 remote:/export rw", local_path.display())
                .map_err(|e| Error::new(ErrorKind::Io, e.to_string()))?;
        }
        Ok(())
    }
}

/// Scratch layout: a root dir with one mount point directory per name, an empty
/// mountinfo file and a config file path.
pub struct Scratch {
    pub dir: tempfile::TempDir,
    pub config: PathBuf,
    pub mountinfo: PathBuf,
}

impl Scratch {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("netmount.conf");
        let mountinfo = dir.path().join("mountinfo");
        std::fs::write(&mountinfo, "22 1 8:2 / / rw,relatime - ext4 /dev/sda2 rw\n").unwrap();
        Self { dir, config, mountinfo }
    }

    /// Create (if needed) and return the mount point `<root>/mnt/<name>`.
    pub fn mount_point(&self, name: &str) -> PathBuf {
        let p = self.dir.path().join("mnt").join(name);
        std::fs::create_dir_all(&p).unwrap();
        p
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config, content).unwrap();
    }

    pub fn mark_mounted(&self, path: &Path) {
        let mut f = std::fs::OpenOptions::new().append(true).open(&self.mountinfo).unwrap();
        writeln!(f, "50 22 0:50 / {} rw - nfs4 remote:/e rw", path.display()).unwrap();
    }

    pub fn policy(&self) -> netmount::policy::Policy {
        netmount::policy::Policy::default()
            .with_config_path(&self.config)
            .with_mountinfo_path(&self.mountinfo)
    }
}

//! TCP reachability probing.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::types::errors::{Error, ErrorKind, Result};

pub trait ReachabilityProbe: Send + Sync {
    /// Check that `host:port` accepts a TCP connection within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an `Error` describing why the host is considered unreachable.
    fn probe(&self, host: &str, port: u16, timeout: Duration) -> Result<()>;
}

/// Name resolution used by [`TcpProbe`].
pub trait Resolver: Send + Sync {
    /// Resolve `host:port` to socket addresses.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when `host` cannot be resolved.
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>>;
}

/// Resolves through the system resolver (`getaddrinfo`).
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        Ok((host, port).to_socket_addrs()?.collect())
    }
}

/// Production probe: a plain TCP connect, no payload. Name resolution and each
/// resolved address share a single deadline.
#[derive(Clone)]
pub struct TcpProbe {
    resolver: Arc<dyn Resolver>,
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::with_resolver(SystemResolver)
    }
}

impl TcpProbe {
    pub fn with_resolver(resolver: impl Resolver + 'static) -> Self {
        Self { resolver: Arc::new(resolver) }
    }

    /// The system resolver has no deadline of its own, so the lookup runs on a
    /// helper thread and is abandoned once `deadline` passes.
    fn resolve(&self, host: &str, port: u16, deadline: Instant) -> Result<Vec<SocketAddr>> {
        let (tx, rx) = mpsc::channel();
        let resolver = Arc::clone(&self.resolver);
        let owned = host.to_string();
        let spawned = thread::Builder::new()
            .name("netmount-resolve".to_string())
            .spawn(move || {
                let _ = tx.send(resolver.resolve(&owned, port));
            });
        let looked_up = match spawned {
            Ok(_) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(remaining) {
                    Ok(r) => r,
                    Err(RecvTimeoutError::Timeout) => return Err(timed_out(host, port)),
                    Err(RecvTimeoutError::Disconnected) => {
                        Err(io::Error::other("resolver thread exited"))
                    }
                }
            }
            Err(e) => {
                log::warn!("could not spawn resolver thread ({e}); resolving inline");
                self.resolver.resolve(host, port)
            }
        };
        looked_up.map_err(|e| {
            Error::new(
                ErrorKind::Resolve,
                format!("dial tcp {}: could not resolve host: {e}", join_host_port(host, port)),
            )
        })
    }
}

impl ReachabilityProbe for TcpProbe {
    fn probe(&self, host: &str, port: u16, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let addrs = self.resolve(host, port, deadline)?;
        if addrs.is_empty() {
            return Err(Error::new(
                ErrorKind::Resolve,
                format!("dial tcp {}: no addresses found", join_host_port(host, port)),
            ));
        }
        let mut last: Option<Error> = None;
        for addr in addrs {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match TcpStream::connect_timeout(&addr, remaining) {
                Ok(_stream) => return Ok(()),
                Err(e) => last = Some(classify(&addr, &e)),
            }
        }
        Err(last.unwrap_or_else(|| timed_out(host, port)))
    }
}

/// `host:port`, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

fn timed_out(host: &str, port: u16) -> Error {
    Error::new(
        ErrorKind::Timeout,
        format!("dial tcp {}: i/o timeout", join_host_port(host, port)),
    )
}

fn classify(addr: &SocketAddr, e: &io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
            Error::new(ErrorKind::Timeout, format!("dial tcp {addr}: i/o timeout"))
        }
        io::ErrorKind::ConnectionRefused => Error::new(
            ErrorKind::Refused,
            format!("dial tcp {addr}: connection refused"),
        ),
        _ => Error::new(ErrorKind::Io, format!("dial tcp {addr}: {e}")),
    }
}

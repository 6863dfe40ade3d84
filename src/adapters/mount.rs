//! External mount invocation.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::constants::MOUNT_POLL_MS;
use crate::types::errors::{Error, ErrorKind, Result};

pub trait MountExecutor: Send + Sync {
    /// Mount the filesystem declared for `local_path`, exactly once.
    ///
    /// # Errors
    ///
    /// Returns an `Error` whose message is the trimmed diagnostic of the failed mount.
    fn mount(&self, local_path: &Path) -> Result<()>;
}

/// Production executor: runs `<program> <local_path>` and lets the program resolve
/// host and protocol from its fstab entry.
#[derive(Debug, Clone)]
pub struct CommandMounter {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl CommandMounter {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), timeout: None }
    }

    /// Kill the mount program once `timeout` elapses.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn_error(&self, e: &io::Error) -> Error {
        Error::new(
            ErrorKind::Io,
            format!("could not run {}: {e}", self.program.display()),
        )
    }

    /// Start `<program> <local_path>` with stdin on /dev/null and stdout and stderr
    /// sharing one pipe, drained on a reader thread so the child never blocks on a
    /// full pipe.
    fn spawn(&self, local_path: &Path) -> Result<(Child, JoinHandle<Vec<u8>>)> {
        let (mut reader, writer) = io::pipe().map_err(|e| self.spawn_error(&e))?;
        let err_writer = writer.try_clone().map_err(|e| self.spawn_error(&e))?;
        let mut cmd = Command::new(&self.program);
        cmd.arg(local_path)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(err_writer);
        let spawned = cmd.spawn();
        // The parent's write ends live in `cmd`; the reader sees EOF only once they are gone.
        drop(cmd);
        let mut child = spawned.map_err(|e| self.spawn_error(&e))?;
        let drain = thread::Builder::new()
            .name("netmount-mount-output".to_string())
            .spawn(move || {
                let mut buf = Vec::new();
                let _ = reader.read_to_end(&mut buf);
                buf
            });
        match drain {
            Ok(h) => Ok((child, h)),
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                Err(self.spawn_error(&e))
            }
        }
    }

    fn wait_bounded(&self, child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
        let t0 = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if t0.elapsed() >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(Error::new(
                            ErrorKind::Timeout,
                            format!("mount timed out after {} ms", timeout.as_millis()),
                        ));
                    }
                    thread::sleep(Duration::from_millis(MOUNT_POLL_MS));
                }
                Err(e) => return Err(self.spawn_error(&e)),
            }
        }
    }
}

impl Default for CommandMounter {
    fn default() -> Self {
        Self::new(crate::constants::MOUNT_PROGRAM)
    }
}

impl MountExecutor for CommandMounter {
    fn mount(&self, local_path: &Path) -> Result<()> {
        let (mut child, drain) = self.spawn(local_path)?;
        // On timeout the reader thread is left detached; a surviving grandchild may
        // still hold the pipe open.
        let status = match self.timeout {
            Some(t) => self.wait_bounded(&mut child, t)?,
            None => child.wait().map_err(|e| self.spawn_error(&e))?,
        };
        if status.success() {
            return Ok(());
        }
        let combined = drain.join().unwrap_or_default();
        let combined = String::from_utf8_lossy(&combined);
        let diag = combined.trim();
        let msg = if diag.is_empty() {
            format!("{} exited with {status}", self.program.display())
        } else {
            diag.to_string()
        };
        Err(Error::new(ErrorKind::Io, msg))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;

    // Script tests run serially: a concurrent fork can inherit the write fd and fail exec with ETXTBSY.
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perm = std::fs::metadata(&p).unwrap().permissions();
        perm.set_mode(0o755);
        std::fs::set_permissions(&p, perm).unwrap();
        p
    }

    #[test]
    #[serial]
    fn success_on_zero_exit() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(td.path(), "ok", "exit 0");
        assert!(CommandMounter::new(prog).mount(Path::new("/mnt/x")).is_ok());
    }

    #[test]
    #[serial]
    fn failure_carries_trimmed_combined_output() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(
            td.path(),
            "fail",
            "echo \"mount.nfs: access denied for $1\" >&2\nexit 32",
        );
        let err = CommandMounter::new(prog).mount(Path::new("/mnt/x")).unwrap_err();
        assert_eq!(err.msg, "mount.nfs: access denied for /mnt/x");
    }

    #[test]
    #[serial]
    fn silent_failure_reports_exit_status() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(td.path(), "quiet", "exit 3");
        let err = CommandMounter::new(&prog).mount(Path::new("/mnt/x")).unwrap_err();
        assert!(err.msg.contains("exited with"), "{}", err.msg);
    }

    #[test]
    #[serial]
    fn missing_program_is_io_error() {
        let err = CommandMounter::new("/nonexistent/mount-helper")
            .mount(Path::new("/mnt/x"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.msg.starts_with("could not run"));
    }

    #[test]
    #[serial]
    fn timeout_kills_hung_mount() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(td.path(), "hang", "exec sleep 5");
        let t0 = Instant::now();
        let err = CommandMounter::new(prog)
            .with_timeout(Some(Duration::from_millis(100)))
            .mount(Path::new("/mnt/x"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(t0.elapsed() < Duration::from_secs(4));
    }

    #[test]
    #[serial]
    fn bounded_run_still_reports_failure_output() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(td.path(), "fail", "echo nope\nexit 1");
        let err = CommandMounter::new(prog)
            .with_timeout(Some(Duration::from_secs(5)))
            .mount(Path::new("/mnt/x"))
            .unwrap_err();
        assert_eq!(err.msg, "nope");
    }

    #[test]
    #[serial]
    fn large_output_does_not_stall_a_bounded_mount() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(
            td.path(),
            "chatty",
            "head -c 300000 /dev/zero | tr '\\000' x\necho\necho denied >&2\nexit 1",
        );
        let err = CommandMounter::new(prog)
            .with_timeout(Some(Duration::from_secs(5)))
            .mount(Path::new("/mnt/x"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.msg.ends_with("denied"), "{}", &err.msg[err.msg.len().saturating_sub(40)..]);
    }

    #[test]
    #[serial]
    fn stdout_and_stderr_are_interleaved_in_write_order() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(td.path(), "mixed", "echo one\necho two >&2\necho three\nexit 1");
        let err = CommandMounter::new(prog).mount(Path::new("/mnt/x")).unwrap_err();
        assert_eq!(err.msg, "one\ntwo\nthree");
    }

    #[test]
    #[serial]
    fn stdin_is_not_inherited() {
        let td = tempfile::tempdir().unwrap();
        let prog = script(td.path(), "reader", "cat\nexit 1");
        let err = CommandMounter::new(prog)
            .with_timeout(Some(Duration::from_secs(5)))
            .mount(Path::new("/mnt/x"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.msg.contains("exited with"), "{}", err.msg);
    }
}

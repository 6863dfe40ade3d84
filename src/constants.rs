//! Shared crate-wide constants for Netmount.
//!
//! Centralizes magic values and default labels used across modules.
//! Adjusting these here will propagate through the crate.

/// Default timeout for the TCP reachability probe, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 150;

/// Kernel file listing the filesystems mounted in the current namespace.
pub const MOUNTINFO_PATH: &str = "/proc/self/mountinfo";

/// External program invoked as `<MOUNT_PROGRAM> <local_path>`; host and protocol
/// are resolved by the program from its fstab entry.
pub const MOUNT_PROGRAM: &str = "mount";

/// Directory (under the XDG config home) and file name of the target list.
pub const CONFIG_DIR_NAME: &str = "netmount";
pub const CONFIG_FILE_NAME: &str = "netmount.conf";

/// Config record layout: `name,local_path,host,port`.
pub const FIELD_SEPARATOR: char = ',';
pub const COMMENT_MARKER: char = '#';
pub const EXPECTED_FIELDS: usize = 4;

/// Width of the name column in the rendered report.
pub const NAME_COLUMN_WIDTH: usize = 20;

/// Poll interval in milliseconds while waiting on a mount child under a timeout.
pub const MOUNT_POLL_MS: u64 = 10;

/// UUIDv5 namespace tag for deterministic run/target IDs.
pub const NS_TAG: &str = "https://netmount/run";

/// Status texts shown when verbosity is off.
pub const MSG_NOT_RESPONDING: &str = "not responding";
pub const MSG_MOUNT_ERROR: &str = "mount error (increase verbosity with option -v)";
pub const MSG_CONFIG_ABORT: &str = "error reading config file, aborting. Use option -v to show error(s)";

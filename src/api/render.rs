//! Text rendering of run reports and fatal errors for stdout.

use std::borrow::Cow;
use std::fmt::Write;
use std::time::Duration;

use crate::constants::{MSG_CONFIG_ABORT, MSG_MOUNT_ERROR, MSG_NOT_RESPONDING, NAME_COLUMN_WIDTH};
use crate::policy::Verbosity;
use crate::types::{MountOutcome, RunReport, ValidationFailure};

/// Status column for one outcome. Diagnostics are only shown when verbose.
pub fn status_text(outcome: &MountOutcome, verbosity: Verbosity) -> Cow<'_, str> {
    match outcome {
        MountOutcome::AlreadyMounted => Cow::Borrowed("already mounted"),
        MountOutcome::NoPort => Cow::Borrowed("no port given"),
        MountOutcome::MountSucceeded => Cow::Borrowed("mounted"),
        MountOutcome::Unreachable(reason) if verbosity.is_verbose() => Cow::Borrowed(reason),
        MountOutcome::Unreachable(_) => Cow::Borrowed(MSG_NOT_RESPONDING),
        MountOutcome::MountFailed(diag) if verbosity.is_verbose() => Cow::Borrowed(diag),
        MountOutcome::MountFailed(_) => Cow::Borrowed(MSG_MOUNT_ERROR),
    }
}

/// One `<name padded> <status>` line per row, in report order.
pub fn render_report(report: &RunReport, verbosity: Verbosity) -> String {
    let mut out = String::new();
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:<width$} {}",
            row.name,
            status_text(&row.outcome, verbosity),
            width = NAME_COLUMN_WIDTH
        );
    }
    out
}

/// `<program> v<version> | <seconds> sec.`
pub fn render_summary(program: &str, version: &str, elapsed: Duration) -> String {
    format!("{program} v{version} | {:.3} sec.", elapsed.as_secs_f64())
}

/// Validation failure text: a generic abort message, or when verbose the numbered
/// config listing followed by every error.
pub fn render_validation_failure(failure: &ValidationFailure, verbosity: Verbosity) -> String {
    if !verbosity.is_verbose() {
        return MSG_CONFIG_ABORT.to_string();
    }
    let mut out = String::new();
    out.push_str(&failure.listing);
    out.push_str("\nErrors:\n");
    for e in &failure.errors {
        let _ = writeln!(out, "{e}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TargetReport, ValidationError};

    fn report() -> RunReport {
        let row = |name: &str, outcome| TargetReport {
            name: name.to_string(),
            local_path: format!("/mnt/{name}").into(),
            outcome,
            duration_ms: 0,
        };
        RunReport {
            run_id: "rid".into(),
            rows: vec![
                row("a", MountOutcome::AlreadyMounted),
                row("b", MountOutcome::Unreachable("dial tcp 10.0.0.2:2049: i/o timeout".into())),
                row("c", MountOutcome::MountFailed("mount.nfs: access denied".into())),
                row("d", MountOutcome::MountSucceeded),
                row("e", MountOutcome::NoPort),
            ],
            duration_ms: 0,
        }
    }

    #[test]
    fn quiet_report_hides_diagnostics() {
        let text = render_report(&report(), Verbosity::Quiet);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:<20} already mounted", "a"));
        assert_eq!(lines[1], format!("{:<20} not responding", "b"));
        assert_eq!(lines[2], format!("{:<20} mount error (increase verbosity with option -v)", "c"));
        assert_eq!(lines[3], format!("{:<20} mounted", "d"));
        assert_eq!(lines[4], format!("{:<20} no port given", "e"));
    }

    #[test]
    fn verbose_report_shows_diagnostics() {
        let text = render_report(&report(), Verbosity::Verbose);
        assert!(text.contains("i/o timeout"));
        assert!(text.contains("mount.nfs: access denied"));
        assert!(!text.contains("not responding"));
    }

    #[test]
    fn summary_has_three_decimals() {
        let s = render_summary("netmount", "1.1.0", Duration::from_millis(1234));
        assert_eq!(s, "netmount v1.1.0 | 1.234 sec.");
    }

    #[test]
    fn validation_failure_rendering_follows_verbosity() {
        let f = ValidationFailure {
            errors: vec![ValidationError::new(2, "field(s) missing, expecting 4 fields, seen 3")],
            listing: "  1: # nas\n  2: nas,/mnt/nas,h\n".into(),
        };
        assert_eq!(render_validation_failure(&f, Verbosity::Quiet), MSG_CONFIG_ABORT);
        let v = render_validation_failure(&f, Verbosity::Verbose);
        assert!(v.starts_with("  1: # nas\n  2: nas,/mnt/nas,h\n\nErrors:\n"));
        assert!(v.ends_with("  2: field(s) missing, expecting 4 fields, seen 3\n"));
    }
}

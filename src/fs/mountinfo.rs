//! Point-in-time snapshot of the mounted-set file.

use std::io;
use std::path::Path;

/// Immutable copy of the mounted-set file content, captured once per run.
///
/// Containment is a plain substring test on the raw content, so the file may be
/// `/proc/self/mountinfo`, `/proc/mounts` or any line-oriented equivalent.
#[derive(Clone, Debug, Default)]
pub struct MountedSet {
    content: String,
}

impl MountedSet {
    /// Read the mounted-set file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn capture(path: &Path) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        log::debug!(
            "captured mounted set from {} ({} lines)",
            path.display(),
            content.lines().count()
        );
        Ok(Self { content })
    }

    pub fn from_content(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// True when `path` appears anywhere in the snapshot, either verbatim or in the
    /// octal-escaped form the kernel uses for whitespace and backslashes.
    pub fn contains(&self, path: &Path) -> bool {
        let raw = path.to_string_lossy();
        if raw.is_empty() {
            return false;
        }
        if self.content.contains(raw.as_ref()) {
            return true;
        }
        let escaped = escape_mount_path(&raw);
        escaped != raw && self.content.contains(&escaped)
    }

    /// Mount points listed in the snapshot. Understands the mountinfo layout
    /// (fifth column) and the fstab-like `/proc/mounts` layout (second column).
    pub fn mount_points(&self) -> Vec<String> {
        self.content
            .lines()
            .filter_map(|line| {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let col = if parts.contains(&"-") { 4 } else { 1 };
                parts.get(col).map(|p| unescape_mount_path(p))
            })
            .collect()
    }
}

fn escape_mount_path(p: &str) -> String {
    let mut out = String::with_capacity(p.len());
    for c in p.chars() {
        match c {
            ' ' => out.push_str("\\040"),
            '\t' => out.push_str("\\011"),
            '\n' => out.push_str("\\012"),
            '\\' => out.push_str("\\134"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_mount_path(p: &str) -> String {
    p.replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\012", "\n")
        .replace("\\134", "\\")
}

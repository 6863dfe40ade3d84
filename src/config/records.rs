use std::fmt::Write;
use std::path::Path;

use crate::constants::{COMMENT_MARKER, FIELD_SEPARATOR};

/// One source line split into trimmed fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the config file.
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Blank and comment lines are neither validated nor reported.
    pub fn is_skippable(&self) -> bool {
        self.fields
            .first()
            .map_or(true, |first| first.starts_with(COMMENT_MARKER))
    }
}

/// All records of a config file plus a numbered listing of its lines.
#[derive(Clone, Debug, Default)]
pub struct ConfigSource {
    pub records: Vec<RawRecord>,
    pub listing: String,
}

/// Split config text into records, one per line.
pub fn parse_records(content: &str) -> ConfigSource {
    let mut out = ConfigSource::default();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        let _ = writeln!(out.listing, "{line_no:3}: {line}");
        let fields = if line.is_empty() {
            Vec::new()
        } else {
            line.split(FIELD_SEPARATOR)
                .map(|f| f.trim().to_string())
                .collect()
        };
        out.records.push(RawRecord::new(line_no, fields));
    }
    out
}

/// Read and split the config file at `path`.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be read.
pub fn read_records(path: &Path) -> std::io::Result<ConfigSource> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_records(&content))
}

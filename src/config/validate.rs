use std::path::Path;

use crate::constants::EXPECTED_FIELDS;
use crate::types::{MountTarget, ValidationError};

use super::records::RawRecord;

const FIELD_NAMES: [&str; EXPECTED_FIELDS] = ["name", "local path", "host", "port"];

/// Validate raw records into mount targets, fail-closed.
///
/// Every non-skippable record is checked and all failures are collected. When any
/// record fails, no target is returned.
///
/// # Errors
///
/// Returns every `ValidationError` found, in line order.
pub fn validate(records: &[RawRecord]) -> Result<Vec<MountTarget>, Vec<ValidationError>> {
    let mut targets = Vec::new();
    let mut errors = Vec::new();
    for rec in records.iter().filter(|r| !r.is_skippable()) {
        match validate_record(rec) {
            Ok(t) => targets.push(t),
            Err(msg) => errors.push(ValidationError::new(rec.line, msg)),
        }
    }
    if errors.is_empty() {
        Ok(targets)
    } else {
        log::debug!("config rejected: {} invalid record(s)", errors.len());
        Err(errors)
    }
}

/// Check one record; the first failing rule wins.
fn validate_record(rec: &RawRecord) -> Result<MountTarget, String> {
    let seen = rec.fields.len();
    if seen < EXPECTED_FIELDS {
        return Err(format!(
            "field(s) missing, expecting {EXPECTED_FIELDS} fields, seen {seen}"
        ));
    }
    if seen > EXPECTED_FIELDS {
        return Err(format!(
            "too many fields, expecting {EXPECTED_FIELDS} fields, seen {seen}"
        ));
    }
    if let Some(idx) = rec.fields.iter().position(String::is_empty) {
        let filled = rec.fields.iter().filter(|f| !f.is_empty()).count();
        return Err(format!(
            "{} field is empty, need {EXPECTED_FIELDS} non-empty fields, seen {filled}",
            FIELD_NAMES[idx]
        ));
    }
    let (name, mnt, host, port) = (&rec.fields[0], &rec.fields[1], &rec.fields[2], &rec.fields[3]);
    ensure_dir(Path::new(mnt))?;
    let port = parse_port(port)?;
    Ok(MountTarget::new(name.as_str(), mnt.as_str(), host.as_str(), port))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    match std::fs::metadata(path) {
        Ok(md) if md.is_dir() => Ok(()),
        _ => Err(format!("\"{}\" mount point is not a dir", path.display())),
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("port number not valid: \"{raw}\" not numerical"));
    }
    raw.parse::<u16>()
        .map_err(|_| format!("port number not valid: \"{raw}\" out of range (0-65535)"))
}

//! Target list loading and validation.
//!
//! This module reads the line-oriented config file into numbered raw records
//! and validates them fail-closed into [`MountTarget`](crate::types::MountTarget)s.

pub mod records;
pub mod validate;

pub use records::{parse_records, read_records, ConfigSource, RawRecord};
pub use validate::validate;

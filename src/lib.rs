#![forbid(unsafe_code)]
//! Netmount: concurrent mounting of declared remote filesystems.
//!
//! Run model highlights:
//! - Targets are loaded from a line-oriented config file and validated fail-closed: one bad line aborts the whole run.
//! - The mounted-set file (`/proc/self/mountinfo`) is captured once, before any task starts, and shared read-only.
//! - One task per target runs mounted-check → reachability probe → `mount <path>`; tasks return typed outcomes and never print.
//! - The report is rendered after every task has joined, sorted by target name.

pub mod constants;
pub mod adapters;
pub mod api;
pub mod config;
pub mod fs;
pub mod logging;
pub mod policy;
pub mod types;

pub use api::*;

//! Run configuration.
//!
//! The `policy` module holds the single configuration value threaded through
//! loading, probing and orchestration. Consumers construct a
//! [`Policy`](crate::policy::Policy) with `Policy::default()` and adjust fields
//! (usually from command-line flags) before creating a
//! [`Netmount`](crate::Netmount) instance.
//!
//! Submodules:
//! - `config`: policy struct, defaults and source path resolution
//! - `types`: grouped knobs

pub mod config;
pub mod types;

pub use config::Policy;
pub use types::{MountFlow, Probe, Sources, Verbosity};

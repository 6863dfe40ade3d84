//! Filesystem-facing helpers.

pub mod mountinfo;

pub use mountinfo::MountedSet;

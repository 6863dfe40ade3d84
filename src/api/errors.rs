use std::path::PathBuf;
use thiserror::Error;

use crate::types::ValidationFailure;

/// Fatal, pre-run failures. Per-target problems are outcomes, never `ApiError`s.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not read config file {}: {reason}", path.display())]
    ConfigUnavailable { path: PathBuf, reason: String },
    #[error("could not read mounted-set file {}: {reason}", path.display())]
    MountInfoUnavailable { path: PathBuf, reason: String },
    #[error("invalid config file: {0}")]
    Validation(ValidationFailure),
    #[error("no targets found in config file, nothing to mount")]
    NothingToMount,
}

impl ApiError {
    #[must_use]
    pub const fn id(&self) -> ErrorId {
        match self {
            ApiError::ConfigUnavailable { .. } => ErrorId::E_CONFIG,
            ApiError::MountInfoUnavailable { .. } => ErrorId::E_MOUNTINFO,
            ApiError::Validation(_) => ErrorId::E_VALIDATION,
            ApiError::NothingToMount => ErrorId::E_NOTHING_TO_MOUNT,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        exit_code_for(self.id())
    }
}

// Stable identifiers surfaced in facts and exit codes.
#[allow(non_camel_case_types, reason = "Error IDs are emitted verbatim in facts")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    E_CONFIG,
    E_MOUNTINFO,
    E_VALIDATION,
    E_NOTHING_TO_MOUNT,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_CONFIG => "E_CONFIG",
        ErrorId::E_MOUNTINFO => "E_MOUNTINFO",
        ErrorId::E_VALIDATION => "E_VALIDATION",
        ErrorId::E_NOTHING_TO_MOUNT => "E_NOTHING_TO_MOUNT",
    }
}

#[must_use]
pub const fn exit_code_for(id: ErrorId) -> i32 {
    match id {
        ErrorId::E_CONFIG => 10,
        ErrorId::E_MOUNTINFO => 20,
        ErrorId::E_VALIDATION => 30,
        ErrorId::E_NOTHING_TO_MOUNT => 40,
    }
}

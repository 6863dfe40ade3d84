use std::fmt;

/// A malformed config record, tagged with its 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub line: usize,
    pub message: String,
}

impl ValidationError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:3}: {}", self.line, self.message)
    }
}

/// Every validation error of a config file plus its numbered listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
    /// `"%3d: <line>"` per source line, for verbose diagnostics.
    pub listing: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid record(s)", self.errors.len())
    }
}

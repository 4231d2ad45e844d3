//! Error types for the geometry crate.

use std::fmt;

/// The kind of geometry error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomErrorKind {
    /// A boolean operation failed (degenerate input, tolerance issue, etc.).
    BooleanFailed,
    /// Tessellation failed to produce a valid mesh.
    TessellationFailed,
    /// The caller provided invalid parameters (zero radius, empty list, etc.).
    InvalidInput,
    /// An I/O error occurred during export.
    IoError,
    /// A face/edge selector matched nothing, or the selector string is malformed.
    SelectionFailed,
    /// A finishing or hull operation produced degenerate geometry.
    DegenerateGeometry,
    /// The backend does not support this operation on the given input.
    Unsupported,
}

impl fmt::Display for GeomErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BooleanFailed => write!(f, "boolean operation failed"),
            Self::TessellationFailed => write!(f, "tessellation failed"),
            Self::InvalidInput => write!(f, "invalid input"),
            Self::IoError => write!(f, "I/O error"),
            Self::SelectionFailed => write!(f, "selector matched no faces or edges"),
            Self::DegenerateGeometry => write!(f, "degenerate geometry"),
            Self::Unsupported => write!(f, "operation not supported by this backend"),
        }
    }
}

/// A geometry error with a kind and a human-readable message.
#[derive(Debug)]
pub struct GeomError {
    pub kind: GeomErrorKind,
    pub message: String,
}

impl GeomError {
    pub fn new(kind: GeomErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GeomError {}

impl From<std::io::Error> for GeomError {
    fn from(err: std::io::Error) -> Self {
        Self::new(GeomErrorKind::IoError, err.to_string())
    }
}

/// Convenience alias for geometry results.
pub type GeomResult<T> = Result<T, GeomError>;

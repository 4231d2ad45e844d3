//! Error types for the export crate.

use std::fmt;

use tiacad_geom::GeomError;

/// The kind of export error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorKind {
    /// The geometry backend failed during tessellation or STL writing.
    Backend,
    /// Writing the output file or archive member failed.
    Io,
    /// A tessellated mesh failed validation before being written out.
    Validation,
}

impl fmt::Display for ExportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "backend error"),
            Self::Io => write!(f, "I/O error"),
            Self::Validation => write!(f, "mesh validation failed"),
        }
    }
}

/// An export error with a kind and a human-readable message.
#[derive(Debug)]
pub struct ExportError {
    pub kind: ExportErrorKind,
    pub message: String,
}

impl ExportError {
    pub fn new(kind: ExportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ExportError {}

pub type ExportResult<T> = Result<T, ExportError>;

impl From<GeomError> for ExportError {
    fn from(e: GeomError) -> Self {
        Self::new(ExportErrorKind::Backend, e.message)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ExportErrorKind::Io, e.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::new(ExportErrorKind::Io, e.to_string())
    }
}

//! Error types for color and material resolution.

use std::fmt;

/// The kind of material error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialErrorKind {
    /// A color string, array, or map did not match any recognized shape.
    InvalidColor,
    /// A material referenced a `base:` catalog entry that does not exist.
    UnknownMaterial,
    /// A PBR field (metallic, roughness, opacity) was outside `[0, 1]`.
    OutOfRange,
}

impl fmt::Display for MaterialErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor => write!(f, "invalid color"),
            Self::UnknownMaterial => write!(f, "unknown material"),
            Self::OutOfRange => write!(f, "value out of range"),
        }
    }
}

/// A material or color error with a kind and a human-readable message.
#[derive(Debug)]
pub struct MaterialError {
    pub kind: MaterialErrorKind,
    pub message: String,
}

impl MaterialError {
    pub fn new(kind: MaterialErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for MaterialError {}

/// Convenience alias for material results.
pub type MaterialResult<T> = Result<T, MaterialError>;

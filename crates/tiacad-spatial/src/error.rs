//! Errors raised while resolving spatial references.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialErrorKind {
    UnknownPart,
    UnknownReference,
    InvalidSelector,
    NoMatch,
    ReferenceCycle,
    InvalidSpec,
}

impl fmt::Display for SpatialErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPart => write!(f, "unknown part"),
            Self::UnknownReference => write!(f, "unknown reference"),
            Self::InvalidSelector => write!(f, "invalid selector"),
            Self::NoMatch => write!(f, "no face or edge matched"),
            Self::ReferenceCycle => write!(f, "reference cycle"),
            Self::InvalidSpec => write!(f, "invalid reference specification"),
        }
    }
}

#[derive(Debug)]
pub struct SpatialError {
    pub kind: SpatialErrorKind,
    pub message: String,
}

impl SpatialError {
    pub fn new(kind: SpatialErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SpatialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SpatialError {}

pub type SpatialResult<T> = Result<T, SpatialError>;

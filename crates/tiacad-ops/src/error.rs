//! Errors raised by the operation engine.

use std::fmt;

use tiacad_geom::GeomError;
use tiacad_material::MaterialError;
use tiacad_registry::RegistryError;
use tiacad_spatial::SpatialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpErrorKind {
    UnknownPart,
    IncompatibleOperand,
    EmptyInput,
    DegenerateGeometry,
    InvalidSpec,
    Geom,
    Reference,
    Material,
}

impl fmt::Display for OpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPart => write!(f, "unknown part"),
            Self::IncompatibleOperand => write!(f, "incompatible operand"),
            Self::EmptyInput => write!(f, "empty input"),
            Self::DegenerateGeometry => write!(f, "degenerate geometry"),
            Self::InvalidSpec => write!(f, "invalid operation spec"),
            Self::Geom => write!(f, "geometry backend error"),
            Self::Reference => write!(f, "reference error"),
            Self::Material => write!(f, "material error"),
        }
    }
}

#[derive(Debug)]
pub struct OpError {
    pub kind: OpErrorKind,
    pub message: String,
}

impl OpError {
    pub fn new(kind: OpErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for OpError {}

pub type OpResult<T> = Result<T, OpError>;

impl From<GeomError> for OpError {
    fn from(e: GeomError) -> Self {
        OpError::new(OpErrorKind::Geom, e.message)
    }
}

impl From<RegistryError> for OpError {
    fn from(e: RegistryError) -> Self {
        OpError::new(OpErrorKind::UnknownPart, e.message)
    }
}

impl From<SpatialError> for OpError {
    fn from(e: SpatialError) -> Self {
        OpError::new(OpErrorKind::Reference, e.message)
    }
}

impl From<MaterialError> for OpError {
    fn from(e: MaterialError) -> Self {
        OpError::new(OpErrorKind::Material, e.message)
    }
}

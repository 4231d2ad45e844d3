//! `BuildError` — the single error type every verb returns, wrapping every
//! lower crate's error behind one kind plus the §7 "context accrual"
//! breadcrumb trail and a nearest-name suggestion.

use std::fmt;

use tiacad_geom::GeomError;
use tiacad_material::MaterialError;
use tiacad_ops::OpError;
use tiacad_param::ParamError;
use tiacad_registry::RegistryError;
use tiacad_spatial::SpatialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// Malformed YAML, unknown keys, wrong shapes, missing required fields.
    Schema,
    /// Parameter evaluation failed: undefined name, cycle, arithmetic error.
    Parameter,
    /// A color or material spec failed to parse or resolve.
    Material,
    /// A spatial reference failed to resolve.
    Reference,
    /// An operation (boolean, pattern, transform, finishing, hull, gusset)
    /// failed, or a part/sketch failed to build.
    Operation,
    /// The geometry backend rejected a request outright.
    Backend,
    /// Selected export part/format could not be resolved.
    Export,
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema error"),
            Self::Parameter => write!(f, "parameter error"),
            Self::Material => write!(f, "material error"),
            Self::Reference => write!(f, "reference error"),
            Self::Operation => write!(f, "operation error"),
            Self::Backend => write!(f, "backend error"),
            Self::Export => write!(f, "export error"),
        }
    }
}

/// The top-level build error. `breadcrumbs` records the frames a failure
/// passed through on its way up (e.g. `["operations", "bolt_circle",
/// "pattern", "source"]`), outermost frame pushed last by the innermost
/// caller and read in declaration order by [`BuildError::location`].
#[derive(Debug)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    pub message: String,
    pub breadcrumbs: Vec<String>,
    pub suggestion: Option<String>,
}

impl BuildError {
    pub fn new(kind: BuildErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            breadcrumbs: Vec::new(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Push a frame name onto the breadcrumb trail. Call from each
    /// propagating layer (document → operations list → one operation →
    /// reference resolution), innermost first.
    pub fn push_frame(mut self, frame: impl Into<String>) -> Self {
        self.breadcrumbs.insert(0, frame.into());
        self
    }

    /// The breadcrumb trail rendered the way §7 shows it:
    /// `operations → bolt_circle → pattern → source`.
    pub fn location(&self) -> String {
        self.breadcrumbs.join(" → ")
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if !self.breadcrumbs.is_empty() {
            write!(f, " (at {})", self.location())?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

pub type BuildResult<T> = Result<T, BuildError>;

impl From<ParamError> for BuildError {
    fn from(e: ParamError) -> Self {
        BuildError::new(BuildErrorKind::Parameter, e.message)
    }
}

impl From<MaterialError> for BuildError {
    fn from(e: MaterialError) -> Self {
        BuildError::new(BuildErrorKind::Material, e.message)
    }
}

impl From<SpatialError> for BuildError {
    fn from(e: SpatialError) -> Self {
        BuildError::new(BuildErrorKind::Reference, e.message)
    }
}

impl From<OpError> for BuildError {
    fn from(e: OpError) -> Self {
        BuildError::new(BuildErrorKind::Operation, e.message)
    }
}

impl From<GeomError> for BuildError {
    fn from(e: GeomError) -> Self {
        BuildError::new(BuildErrorKind::Backend, e.message)
    }
}

impl From<RegistryError> for BuildError {
    fn from(e: RegistryError) -> Self {
        BuildError::new(BuildErrorKind::Operation, e.message)
    }
}

impl From<serde_yaml::Error> for BuildError {
    fn from(e: serde_yaml::Error) -> Self {
        BuildError::new(BuildErrorKind::Schema, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_breadcrumbs_in_order() {
        let err = BuildError::new(BuildErrorKind::Operation, "pattern source missing")
            .push_frame("source")
            .push_frame("pattern")
            .push_frame("bolt_circle")
            .push_frame("operations");
        assert_eq!(err.location(), "operations → bolt_circle → pattern → source");
    }

    #[test]
    fn display_includes_suggestion() {
        let err = BuildError::new(BuildErrorKind::Material, "no material named 'alumnium'")
            .with_suggestion("aluminum");
        assert!(err.to_string().contains("did you mean 'aluminum'?"));
    }
}

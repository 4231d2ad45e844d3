//! The reference specification grammar accepted wherever a document calls
//! for a `SpatialRef`: array literals, dotted names, and inline mappings.

use tiacad_geom::{Point3, Vector3};

/// `at` selector for a face reference; only `center` is defined today, but
/// the variant exists so new face anchors don't require a signature change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceAt {
    #[default]
    Center,
}

/// `at` selector for an edge reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeAt {
    #[default]
    Midpoint,
    Start,
    End,
}

impl EdgeAt {
    pub fn t(self) -> f64 {
        match self {
            EdgeAt::Midpoint => 0.5,
            EdgeAt::Start => 0.0,
            EdgeAt::End => 1.0,
        }
    }
}

/// A reference specification, as it appears in a document before
/// resolution against the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RefSpec {
    /// `[x, y, z]` — an absolute world-space point.
    Array(Point3),
    /// `"partName"` or `"partName.refName"` — a dotted name, either a
    /// user-declared reference or an auto-generated part-local one.
    Name(String),
    /// `{type: ..., ...}` — an inline mapping.
    Inline(InlineSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InlineSpec {
    Point {
        value: Option<Point3>,
        from: Option<Box<RefSpec>>,
        offset: Option<Vector3>,
    },
    Face {
        part: String,
        selector: Option<String>,
        at: FaceAt,
    },
    Edge {
        part: String,
        selector: Option<String>,
        at: EdgeAt,
    },
    Axis {
        from: Point3,
        to: Point3,
    },
}

/// Split a dotted reference name (`"base.face_top"`) into its part and
/// suffix components. A bare name (`"base"`) has no suffix.
pub fn split_dotted(name: &str) -> (&str, Option<&str>) {
    match name.split_once('.') {
        Some((part, suffix)) => (part, Some(suffix)),
        None => (name, None),
    }
}

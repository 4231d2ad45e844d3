//! Primitive/sketch builders and the operation engine for TiaCAD: the
//! layer that turns a document's `parts:` and `operations:` entries into
//! registry mutations via a [`tiacad_geom::GeometryBackend`].

pub mod boolean_op;
pub mod error;
pub mod finishing_op;
pub mod fonts;
pub mod gusset_op;
pub mod hull_op;
pub mod pattern;
pub mod primitives;
pub mod sketch;
pub mod transform_op;

pub use boolean_op::{difference, intersection, union};
pub use error::{OpError, OpErrorKind, OpResult};
pub use finishing_op::{chamfer, fillet, shell, Selector};
pub use fonts::{FontHandle, FontRegistry, FontResolution, FontStyle};
pub use gusset_op::gusset;
pub use hull_op::hull;
pub use pattern::{build_pattern, LinearAxis, PatternSpec};
pub use primitives::{build_primitive, OriginMode, PrimitiveSpec};
pub use sketch::{build_wires, extrude_wires, HAlign, ProfileShape, SketchPlane, VAlign};
pub use transform_op::{apply_transform, AlignOrientation, AxisSpec, OriginSpec, ScaleSpec, TransformStep};

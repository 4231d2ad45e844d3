//! Spatial reference system for TiaCAD: turns a document's reference
//! specifications (array literals, dotted names, inline mappings) into
//! world-coordinate [`SpatialRef`]s, and derives local [`Frame`]s from them
//! so offsets follow a reference's orientation.

pub mod autoref;
pub mod error;
pub mod resolver;
pub mod source;
pub mod spec;
pub mod types;

pub use error::{SpatialError, SpatialErrorKind, SpatialResult};
pub use resolver::SpatialResolver;
pub use source::{PartKind, PartSource};
pub use spec::{split_dotted, EdgeAt, FaceAt, InlineSpec, RefSpec};
pub use types::{Frame, RefType, SpatialRef};

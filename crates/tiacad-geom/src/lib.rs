//! Geometry kernel abstraction for TiaCAD.
//!
//! Provides primitives, sketch-to-solid operations, booleans,
//! transformations, finishing (fillet/chamfer/shell), convex hull,
//! selection, queries, tessellation, and STL export via the **truck**
//! B-rep kernel.

pub mod boolean;
pub mod error;
pub mod finishing;
pub mod hull;
pub mod kernel;
pub mod primitives;
pub mod query;
pub mod select;
pub mod sketch;
pub mod sweep;
pub mod tessellate;
pub mod transform;
pub mod truck_kernel;
pub mod types;

pub use error::{GeomError, GeomErrorKind, GeomResult};
pub use kernel::GeometryBackend;
pub use truck_kernel::TruckBackend;
pub use types::{BoundingBox, Edge, Face, Mesh, Point3, Solid, Vector3, Wire, DEFAULT_TOLERANCE};

//! Export pipeline for TiaCAD.
//!
//! Four writers over the backend's tessellation: binary STL, a
//! multi-material 3MF archive, a faceted STEP file, and OBJ+MTL. Every
//! writer tessellates through [`tiacad_geom::GeometryBackend`] and
//! validates the resulting mesh before serializing it; none re-implement
//! tessellation or mesh validation themselves.

pub mod error;
pub mod obj;
pub mod part;
pub mod quality;
pub mod step;
pub mod stl;
pub mod threemf;
pub mod validate;

pub use error::{ExportError, ExportErrorKind, ExportResult};
pub use obj::export_obj;
pub use part::ExportPart;
pub use quality::Quality;
pub use step::export_step;
pub use stl::export_stl;
pub use threemf::export_3mf;
pub use validate::{validate_mesh, MeshReport, MeshWarning};

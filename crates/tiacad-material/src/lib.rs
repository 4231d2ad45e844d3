//! Color parsing and PBR material catalog for TiaCAD documents.
//!
//! Colors may appear in a document as a hex string, a named color, an
//! `[r, g, b(, a)]` array, or an `{r, g, b, a}` map; materials layer PBR
//! fields (metallic, roughness, opacity) on top and may extend a named
//! catalog entry via `base:`.

pub mod catalog;
pub mod color;
pub mod error;
pub mod material;

pub use catalog::Catalog;
pub use color::{Color, ColorMap, ColorSpec};
pub use error::{MaterialError, MaterialErrorKind, MaterialResult};
pub use material::{Material, MaterialSpec, StructuredMaterialSpec};

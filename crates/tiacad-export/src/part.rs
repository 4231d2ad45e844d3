//! The shared view of a built part that every exporter (other than plain
//! STL, which only needs a solid) walks.

use tiacad_geom::Solid;
use tiacad_registry::Appearance;

/// A part ready for export: its name, its built solid, and its resolved
/// appearance (color/material, or none).
pub struct ExportPart<'a> {
    pub name: &'a str,
    pub solid: &'a Solid,
    pub appearance: &'a Appearance,
}

//! Mesh validation and reporting (spec.md §8 "mesh validity").

use tiacad_geom::Mesh;

/// A warning about a potential mesh issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshWarning {
    /// The mesh contains no geometry at all.
    EmptyMesh,
    /// A vertex position contains a NaN or infinite component.
    NonFiniteVertex,
}

impl std::fmt::Display for MeshWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh is empty (no positions or triangles)"),
            Self::NonFiniteVertex => write!(f, "mesh contains a non-finite vertex position"),
        }
    }
}

/// Summary report from mesh validation.
#[derive(Debug, Clone)]
pub struct MeshReport {
    /// Number of vertex positions.
    pub position_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Any warnings detected during validation.
    pub warnings: Vec<MeshWarning>,
}

impl MeshReport {
    /// Returns `true` if validation found no warnings.
    pub fn is_ok(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validate a mesh and produce a report. Every triangle index is
/// guaranteed in range by construction (`Mesh::triangles` indexes into
/// `Mesh::positions`), so only emptiness and vertex finiteness are checked
/// here.
pub fn validate_mesh(mesh: &Mesh) -> MeshReport {
    let position_count = mesh.position_count();
    let triangle_count = mesh.triangle_count();

    let mut warnings = Vec::new();
    if mesh.is_empty() || triangle_count == 0 {
        warnings.push(MeshWarning::EmptyMesh);
    }
    if mesh
        .positions()
        .iter()
        .any(|p| !p.x.is_finite() || !p.y.is_finite() || !p.z.is_finite())
    {
        warnings.push(MeshWarning::NonFiniteVertex);
    }

    MeshReport {
        position_count,
        triangle_count,
        warnings,
    }
}

//! Binary STL export (spec.md §6.2: "Binary STL; tessellated at the
//! export tolerance; single-solid.").

use std::path::Path;

use tiacad_geom::{GeometryBackend, Solid};

use crate::error::{ExportError, ExportErrorKind, ExportResult};
use crate::validate::{validate_mesh, MeshWarning};

/// Tessellate `solid` at `tolerance` and write it as a binary STL file.
pub fn export_stl<B: GeometryBackend>(
    backend: &B,
    solid: &Solid,
    path: &Path,
    tolerance: f64,
) -> ExportResult<()> {
    let mesh = backend.tessellate(solid, tolerance);
    let report = validate_mesh(&mesh);
    if report.warnings.contains(&MeshWarning::EmptyMesh) {
        return Err(ExportError::new(
            ExportErrorKind::Validation,
            "tessellation produced an empty mesh",
        ));
    }
    backend.export_stl(&mesh, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::TruckBackend;

    #[test]
    fn export_stl_writes_nonempty_file() {
        let backend = TruckBackend;
        let solid = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let dir = std::env::temp_dir();
        let path = dir.join("tiacad_export_test_box.stl");
        export_stl(&backend, &solid, &path, 0.1).expect("STL export should succeed");
        let meta = std::fs::metadata(&path).expect("file should exist");
        assert!(meta.len() > 0);
        std::fs::remove_file(&path).ok();
    }
}

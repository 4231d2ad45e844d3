//! OBJ + companion MTL export (spec.md §6.2, SPEC_FULL.md §3 supplement):
//! a mesh OBJ with an optional per-part `.mtl` material library, written
//! the same hand-rolled-serializer way as the STL/STEP writers.

use std::path::{Path, PathBuf};

use tiacad_geom::GeometryBackend;

use crate::error::{ExportError, ExportErrorKind, ExportResult};
use crate::part::ExportPart;
use crate::validate::{validate_mesh, MeshWarning};

/// Write `parts` to a single OBJ file at `path`, with one `o` group per
/// part. If `write_mtl` is true and any part carries a material, a
/// companion `.mtl` file (same stem as `path`, `.mtl` extension) is written
/// alongside it and referenced via `mtllib`/`usemtl`; if `write_mtl` is
/// false, the OBJ is still written but carries no material references.
pub fn export_obj<B: GeometryBackend>(
    backend: &B,
    parts: &[ExportPart],
    path: &Path,
    tolerance: f64,
    write_mtl: bool,
) -> ExportResult<()> {
    if parts.is_empty() {
        return Err(ExportError::new(
            ExportErrorKind::Validation,
            "no parts selected for OBJ export",
        ));
    }

    let has_materials = write_mtl && parts.iter().any(|p| p.appearance.material.is_some());
    let mtl_path = mtl_companion_path(path);

    let mut obj = String::new();
    obj.push_str("# generated by tiacad-export\n");
    if has_materials {
        obj.push_str(&format!(
            "mtllib {}\n",
            mtl_path.file_name().unwrap().to_string_lossy()
        ));
    }

    let mut vertex_offset = 0usize;
    let mut mtl = String::from("# generated by tiacad-export\n");

    for part in parts {
        let mesh = backend.tessellate(part.solid, tolerance);
        let report = validate_mesh(&mesh);
        if report.warnings.contains(&MeshWarning::EmptyMesh) {
            return Err(ExportError::new(
                ExportErrorKind::Validation,
                format!("part '{}' tessellated to an empty mesh", part.name),
            ));
        }

        obj.push_str(&format!("o {}\n", part.name));
        for p in mesh.positions() {
            obj.push_str(&format!("v {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        if write_mtl {
            if let Some(material) = &part.appearance.material {
                let mtl_name = format!("{}_mat", part.name);
                obj.push_str(&format!("usemtl {mtl_name}\n"));
                mtl.push_str(&material_block(&mtl_name, material));
            }
        }
        for tri in mesh.triangles() {
            // OBJ face indices are 1-based and global across the file.
            obj.push_str(&format!(
                "f {} {} {}\n",
                tri[0] + 1 + vertex_offset,
                tri[1] + 1 + vertex_offset,
                tri[2] + 1 + vertex_offset,
            ));
        }
        vertex_offset += mesh.position_count();
    }

    std::fs::write(path, obj)?;
    if has_materials {
        std::fs::write(&mtl_path, mtl)?;
    }
    Ok(())
}

fn mtl_companion_path(obj_path: &Path) -> PathBuf {
    obj_path.with_extension("mtl")
}

fn material_block(name: &str, material: &tiacad_material::Material) -> String {
    let c = material.base_color;
    format!(
        "newmtl {name}\nKd {:.6} {:.6} {:.6}\nd {:.6}\nPr {:.6}\nPm {:.6}\n",
        c.r, c.g, c.b, material.opacity, material.roughness, material.metallic,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::TruckBackend;
    use tiacad_material::{Color, Material};
    use tiacad_registry::Appearance;

    #[test]
    fn export_obj_without_material_skips_mtl() {
        let backend = TruckBackend;
        let solid = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let appearance = Appearance::none();
        let parts = vec![ExportPart { name: "box", solid: &solid, appearance: &appearance }];
        let dir = std::env::temp_dir();
        let path = dir.join("tiacad_export_test_no_mtl.obj");
        let mtl_path = mtl_companion_path(&path);
        std::fs::remove_file(&mtl_path).ok();

        export_obj(&backend, &parts, &path, 0.1, true).expect("OBJ export should succeed");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# generated"));
        assert!(!content.contains("mtllib"));
        assert!(!mtl_path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn export_obj_with_material_writes_companion_mtl() {
        let backend = TruckBackend;
        let solid = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let appearance = Appearance {
            material: Some(Material::new(Color::rgb(0.2, 0.4, 0.8), 0.1, 0.6, 1.0)),
        };
        let parts = vec![ExportPart { name: "box", solid: &solid, appearance: &appearance }];
        let dir = std::env::temp_dir();
        let path = dir.join("tiacad_export_test_with_mtl.obj");
        export_obj(&backend, &parts, &path, 0.1, true).expect("OBJ export should succeed");

        let obj_content = std::fs::read_to_string(&path).unwrap();
        assert!(obj_content.contains("mtllib"));
        assert!(obj_content.contains("usemtl box_mat"));

        let mtl_path = mtl_companion_path(&path);
        let mtl_content = std::fs::read_to_string(&mtl_path).unwrap();
        assert!(mtl_content.contains("newmtl box_mat"));

        std::fs::remove_file(&path).ok();
        std::fs::remove_file(&mtl_path).ok();
    }

    #[test]
    fn export_obj_with_write_mtl_false_omits_material_references() {
        let backend = TruckBackend;
        let solid = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let appearance = Appearance {
            material: Some(Material::new(Color::rgb(0.2, 0.4, 0.8), 0.1, 0.6, 1.0)),
        };
        let parts = vec![ExportPart { name: "box", solid: &solid, appearance: &appearance }];
        let dir = std::env::temp_dir();
        let path = dir.join("tiacad_export_test_no_mtl_flag.obj");
        let mtl_path = mtl_companion_path(&path);
        std::fs::remove_file(&mtl_path).ok();

        export_obj(&backend, &parts, &path, 0.1, false).expect("OBJ export should succeed");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("mtllib"));
        assert!(!content.contains("usemtl"));
        assert!(!mtl_path.exists());
        std::fs::remove_file(&path).ok();
    }
}

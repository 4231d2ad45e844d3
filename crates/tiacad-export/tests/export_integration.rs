//! Integration tests for the tiacad-export crate: one end-to-end export per
//! format, run against a multi-part scene.

use tiacad_export::{export_3mf, export_obj, export_step, export_stl, validate_mesh, ExportPart, Quality};
use tiacad_geom::{GeometryBackend, TruckBackend};
use tiacad_material::{Color, Material};
use tiacad_registry::Appearance;

#[test]
fn stl_export_of_sphere_is_nonempty_and_finer_quality_has_more_triangles() {
    let backend = TruckBackend;
    let solid = backend.sphere(8.0).unwrap();
    let dir = std::env::temp_dir();

    let draft_path = dir.join("integ_sphere_draft.stl");
    export_stl(&backend, &solid, &draft_path, Quality::Draft.tolerance()).unwrap();
    let fine_path = dir.join("integ_sphere_fine.stl");
    export_stl(&backend, &solid, &fine_path, Quality::Fine.tolerance()).unwrap();

    let draft_mesh = backend.tessellate(&solid, Quality::Draft.tolerance());
    let fine_mesh = backend.tessellate(&solid, Quality::Fine.tolerance());
    assert!(fine_mesh.triangle_count() > draft_mesh.triangle_count());

    let report = validate_mesh(&fine_mesh);
    assert!(report.is_ok());

    std::fs::remove_file(&draft_path).ok();
    std::fs::remove_file(&fine_path).ok();
}

#[test]
fn multi_part_export_round_across_all_four_formats() {
    let backend = TruckBackend;
    let plate = backend.cylinder(75.0, 8.0).unwrap();
    let hole = backend.cylinder(3.25, 10.0).unwrap();
    let plate_appearance = Appearance {
        material: Some(Material::new(Color::rgb(0.6, 0.6, 0.65), 0.8, 0.3, 1.0)),
    };
    let hole_appearance = Appearance::none();

    let parts = vec![
        ExportPart { name: "plate", solid: &plate, appearance: &plate_appearance },
        ExportPart { name: "hole", solid: &hole, appearance: &hole_appearance },
    ];

    let dir = std::env::temp_dir();

    let threemf_path = dir.join("integ_multi.3mf");
    export_3mf(&backend, &parts, &threemf_path, Quality::Standard.tolerance()).unwrap();
    let bytes = std::fs::read(&threemf_path).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
    std::fs::remove_file(&threemf_path).ok();

    let step_path = dir.join("integ_multi.step");
    export_step(&backend, &parts, &step_path, Quality::Standard.tolerance()).unwrap();
    let step_content = std::fs::read_to_string(&step_path).unwrap();
    assert!(step_content.starts_with("ISO-10303-21;"));
    std::fs::remove_file(&step_path).ok();

    let obj_path = dir.join("integ_multi.obj");
    export_obj(&backend, &parts, &obj_path, Quality::Standard.tolerance(), true).unwrap();
    let obj_content = std::fs::read_to_string(&obj_path).unwrap();
    assert!(obj_content.contains("o plate"));
    assert!(obj_content.contains("o hole"));
    let mtl_path = obj_path.with_extension("mtl");
    assert!(mtl_path.exists());
    std::fs::remove_file(&obj_path).ok();
    std::fs::remove_file(&mtl_path).ok();
}

#[test]
fn export_rejects_empty_part_list() {
    let backend = TruckBackend;
    let parts: Vec<ExportPart> = vec![];
    let dir = std::env::temp_dir();
    let path = dir.join("integ_empty.3mf");
    assert!(export_3mf(&backend, &parts, &path, 0.1).is_err());
}

//! End-to-end integration tests for tiacad-geom.

use tiacad_geom::{GeometryBackend, Point3, TruckBackend, Vector3};

fn backend() -> TruckBackend {
    TruckBackend
}

#[test]
fn mounting_plate_workflow() {
    let b = backend();

    // Create a plate and translate it so it's centered on x/y.
    let plate = b.box_solid(40.0, 30.0, 5.0).unwrap();
    let plate = b.translate(&plate, Vector3::new(-20.0, -15.0, 0.0)).unwrap();

    // Create a cylindrical hole and subtract it.
    let hole = b.cylinder(4.0, 10.0).unwrap();
    let hole = b.translate(&hole, Vector3::new(0.0, 0.0, -2.5)).unwrap();

    let result = b.difference(&plate, &hole);
    assert!(result.is_ok(), "plate - hole should succeed");
    let result = result.unwrap();

    // Tessellate and export to STL.
    let mesh = b.tessellate(&result, 0.1);
    let dir = std::env::temp_dir();
    let path = dir.join("tiacad_integration_plate.stl");
    b.export_stl(&mesh, &path).expect("STL export should succeed");

    let meta = std::fs::metadata(&path).expect("STL file should exist");
    assert!(meta.len() > 0, "STL file should be non-empty");
    std::fs::remove_file(&path).ok();
}

#[test]
fn union_many_cylinders() {
    let b = backend();

    // Create 4 small cylinders at different positions and union them.
    let offsets = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
        Vector3::new(0.0, 10.0, 0.0),
        Vector3::new(10.0, 10.0, 0.0),
    ];

    let cylinders: Vec<_> = offsets
        .iter()
        .map(|&off| b.translate(&b.cylinder(2.0, 8.0).unwrap(), off).unwrap())
        .collect();

    let result = b.union_many(&cylinders);
    assert!(result.is_ok(), "union_many should succeed");
}

#[test]
fn sphere_tessellation_roundtrip() {
    let b = backend();
    let sphere = b.sphere(10.0).unwrap();
    let mesh = b.tessellate(&sphere, 0.5);

    let dir = std::env::temp_dir();
    let path = dir.join("tiacad_integration_sphere.stl");
    b.export_stl(&mesh, &path).expect("sphere STL export should succeed");

    let meta = std::fs::metadata(&path).expect("STL file should exist");
    assert!(meta.len() > 84, "sphere STL should have more than just a header");
    std::fs::remove_file(&path).ok();
}

#[test]
fn transform_chain() {
    let b = backend();
    let solid = b.box_solid(5.0, 5.0, 5.0).unwrap();
    let moved = b.translate(&solid, Vector3::new(10.0, 0.0, 0.0)).unwrap();
    let rotated = b
        .rotate(&moved, Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_4)
        .unwrap();
    let scaled = b.scale(&rotated, Point3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0)).unwrap();
    let _mirrored = b.mirror(&scaled, Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
}

#[test]
fn finishing_and_hull_operations_produce_solids() {
    let b = backend();
    let plate = b.box_solid(20.0, 20.0, 4.0).unwrap();

    let rounded = b.fillet(&plate, 1.0).unwrap();
    let bbox = b.bounding_box(&rounded).unwrap();
    assert!(bbox.size().x > 0.0);

    let beveled = b.chamfer(&plate, 0.5).unwrap();
    let hollow = b.shell(&beveled, 0.5).unwrap();
    assert!(b.bounding_box(&hollow).is_ok());

    let a = b.box_solid(5.0, 5.0, 5.0).unwrap();
    let c = b.translate(&b.sphere(3.0).unwrap(), Vector3::new(8.0, 0.0, 0.0)).unwrap();
    let hulled = b.hull(&[a, c]).unwrap();
    assert!(b.bounding_box(&hulled).unwrap().size().x > 8.0);
}

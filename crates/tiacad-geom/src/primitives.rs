//! Primitive solid construction via the truck builder.

use std::f64::consts::PI;
use truck_modeling::{builder, EuclideanSpace, Point3, Rad, Vector3};

use crate::types::TruckSolid;

/// Create an axis-aligned box with the given dimensions.
///
/// The box spans from the origin to `(size_x, size_y, size_z)`.
pub fn make_box(size_x: f64, size_y: f64, size_z: f64) -> TruckSolid {
    let vertex = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&vertex, Vector3::new(size_x, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, size_y, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, size_z))
}

/// Create a cylinder along the Z axis with base at the origin.
pub fn make_cylinder(radius: f64, height: f64) -> TruckSolid {
    let vertex = builder::vertex(Point3::new(radius, 0.0, 0.0));
    let circle = builder::rsweep(
        &vertex,
        Point3::origin(),
        Vector3::unit_z(),
        Rad(2.0 * PI),
    );
    let disk = builder::try_attach_plane(&[circle]).expect("circle should form a valid plane");
    builder::tsweep(&disk, Vector3::new(0.0, 0.0, height))
}

/// Create a sphere centered at the origin.
pub fn make_sphere(radius: f64) -> TruckSolid {
    // Build a semicircular wire from south pole to north pole, then revolve
    // it into a face, then revolve that face's wire into a solid.
    //
    // Strategy: create a semicircle wire, attach a plane to get a half-disk face,
    // then rsweep the face by 2π around Z to get a solid.
    let south = builder::vertex(Point3::new(0.0, 0.0, -radius));
    let north = builder::vertex(Point3::new(0.0, 0.0, radius));
    let transit = Point3::new(radius, 0.0, 0.0);
    let arc = builder::circle_arc(&south, &north, transit);
    // Close the wire with a straight line from north back to south along Z axis.
    let line = builder::line(&north, &south);
    let wire = truck_modeling::Wire::from(vec![arc, line]);
    let half_disk =
        builder::try_attach_plane(&[wire]).expect("semicircle+line should form a plane");
    // Revolve the half-disk face 2π around the Z axis to produce a sphere solid.
    builder::rsweep(&half_disk, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI))
}

/// Create a cone along the Z axis, base at the origin.
///
/// `top_radius` may be zero (a true cone) or nonzero (a frustum).
pub fn make_cone(base_radius: f64, top_radius: f64, height: f64) -> TruckSolid {
    let base_v = builder::vertex(Point3::new(base_radius, 0.0, 0.0));
    let top_v = builder::vertex(Point3::new(top_radius, 0.0, height));
    let slant = builder::line(&base_v, &top_v);
    let wire = if top_radius.abs() < f64::EPSILON {
        // True cone: apex lies on the axis, close with a line straight down to
        // the base circle's start vertex.
        let apex = builder::vertex(Point3::new(0.0, 0.0, height));
        let down = builder::line(&top_v, &apex);
        truck_modeling::Wire::from(vec![slant, down])
    } else {
        let down = builder::line(&top_v, &base_v);
        truck_modeling::Wire::from(vec![slant, down])
    };
    // Revolve the generating profile (base radius -> top radius) around Z.
    let disk =
        builder::try_attach_plane(&[wire]).expect("cone profile should form a valid plane");
    builder::rsweep(&disk, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI))
}

/// Create a torus centered at the origin, lying in the XY plane.
///
/// `major_radius` is the distance from the center to the tube's centerline;
/// `minor_radius` is the tube's own radius.
pub fn make_torus(major_radius: f64, minor_radius: f64) -> TruckSolid {
    let center = Point3::new(major_radius, 0.0, 0.0);
    let tube_start = builder::vertex(Point3::new(major_radius + minor_radius, 0.0, 0.0));
    let circle = builder::rsweep(&tube_start, center, Vector3::unit_y(), Rad(2.0 * PI));
    let tube_face =
        builder::try_attach_plane(&[circle]).expect("tube cross-section should form a plane");
    builder::rsweep(&tube_face, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI))
}

//! Geometric queries over faces, edges, and whole solids.

use truck_modeling::{EuclideanSpace, InnerSpace};

use crate::error::{GeomError, GeomErrorKind, GeomResult};
use crate::types::{BoundingBox, Point3, TruckEdge, TruckFace, TruckSolid, Vector3};

/// The centroid of a face's boundary vertices.
///
/// An approximation: the true surface centroid would require integrating
/// over the parametrized surface, but the boundary-vertex average is exact
/// for planar faces (the common case for sketch-derived solids) and close
/// enough for curved ones to drive placement.
pub fn face_center(face: &TruckFace) -> Point3 {
    let points = boundary_points(face);
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.to_vec());
    Point3::origin() + sum / points.len() as f64
}

/// The outward unit normal of a face, estimated from its boundary.
pub fn face_normal(face: &TruckFace) -> GeomResult<Vector3> {
    let points = boundary_points(face);
    if points.len() < 3 {
        return Err(GeomError::new(
            GeomErrorKind::DegenerateGeometry,
            "face has fewer than 3 boundary points",
        ));
    }
    let v1 = points[1] - points[0];
    let v2 = points[2] - points[0];
    let mut n = v1.cross(v2);
    if n.magnitude() < 1e-9 {
        return Err(GeomError::new(
            GeomErrorKind::DegenerateGeometry,
            "face boundary is collinear",
        ));
    }
    n = n.normalize();
    if !face.orientation() {
        n = -n;
    }
    Ok(n)
}

/// A point on an edge at parameter `t` in `[0, 1]`, linearly interpolated
/// between its endpoints.
pub fn edge_point_at(edge: &TruckEdge, t: f64) -> Point3 {
    let front = edge.front().point();
    let back = edge.back().point();
    Point3::origin() + (front.to_vec() * (1.0 - t) + back.to_vec() * t)
}

/// The (constant, endpoint-to-endpoint) tangent direction of an edge.
pub fn edge_tangent_at(edge: &TruckEdge, _t: f64) -> GeomResult<Vector3> {
    let front = edge.front().point();
    let back = edge.back().point();
    let d = back - front;
    if d.magnitude() < 1e-9 {
        return Err(GeomError::new(
            GeomErrorKind::DegenerateGeometry,
            "edge has coincident endpoints",
        ));
    }
    Ok(d.normalize())
}

/// The axis-aligned bounding box of a solid, computed from a coarse
/// tessellation of its boundary.
pub fn bounding_box(solid: &TruckSolid, tolerance: f64) -> BoundingBox {
    let mesh = crate::tessellate::mesh_solid(solid, tolerance);
    let positions = mesh.positions();
    if positions.is_empty() {
        return BoundingBox::new(Point3::origin(), Point3::origin());
    }
    let mut min = positions[0];
    let mut max = positions[0];
    for p in positions {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    BoundingBox::new(min, max)
}

fn boundary_points(face: &TruckFace) -> Vec<Point3> {
    face.boundaries()
        .iter()
        .flat_map(|wire| wire.vertex_iter())
        .map(|v| v.point())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;

    #[test]
    fn bounding_box_of_box_matches_dimensions() {
        let solid = make_box(10.0, 20.0, 30.0);
        let bbox = bounding_box(&solid, 0.1);
        let size = bbox.size();
        assert!((size.x - 10.0).abs() < 0.5);
        assert!((size.y - 20.0).abs() < 0.5);
        assert!((size.z - 30.0).abs() < 0.5);
    }

    #[test]
    fn face_center_and_normal_of_box_face() {
        let solid = make_box(10.0, 10.0, 10.0);
        let shell = &solid.boundaries()[0];
        let face = shell.face_iter().next().expect("box should have faces");
        let center = face_center(face);
        // Every face of the unit box should have its center within bounds.
        assert!(center.x >= -1e-6 && center.x <= 10.0 + 1e-6);
        let normal = face_normal(face).expect("planar face should have a normal");
        assert!((normal.magnitude() - 1.0).abs() < 1e-6);
    }
}

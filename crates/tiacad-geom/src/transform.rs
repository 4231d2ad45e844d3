//! Transformation operations on solids.

use truck_modeling::{builder, Matrix4, Point3, Rad, Vector3};
use truck_polymesh::PolygonMesh;

use crate::types::TruckSolid;

/// Non-uniform scale matrix helper, since truck's `builder::scaled` only
/// takes a single `Vector3` of per-axis factors directly (no separate
/// uniform/non-uniform entry point is needed at this layer).
pub fn solid_scale_nonuniform(solid: &TruckSolid, center: Point3, factors: Vector3) -> TruckSolid {
    builder::scaled(solid, center, factors)
}

/// Apply an arbitrary affine transform to every vertex position of a mesh,
/// leaving its triangle topology untouched.
///
/// Used for mesh-only solids (post-finishing or post-hull), where the
/// `builder::*` transform helpers above no longer apply since there is no
/// B-rep left to transform.
pub fn mesh_transform(mesh: &PolygonMesh, matrix: Matrix4) -> PolygonMesh {
    use truck_modeling::Transform;
    let positions: Vec<Point3> = mesh.positions().iter().map(|p| matrix.transform_point(*p)).collect();
    let faces = mesh.faces().clone();
    let attrs = truck_polymesh::StandardAttributes {
        positions,
        uv_coords: Vec::new(),
        normals: Vec::new(),
    };
    PolygonMesh::new(attrs, faces)
}

/// Translate a solid by a vector.
pub fn solid_translate(solid: &TruckSolid, v: Vector3) -> TruckSolid {
    builder::translated(solid, v)
}

/// Rotate a solid around an axis through `origin`.
pub fn solid_rotate(
    solid: &TruckSolid,
    origin: Point3,
    axis: Vector3,
    angle_rad: f64,
) -> TruckSolid {
    builder::rotated(solid, origin, axis, Rad(angle_rad))
}

/// Uniformly scale a solid about `center`.
pub fn solid_scale(solid: &TruckSolid, center: Point3, factor: f64) -> TruckSolid {
    builder::scaled(solid, center, Vector3::new(factor, factor, factor))
}

/// Build the affine reflection matrix for mirroring across a plane defined
/// by `origin` and `normal`.
///
/// Uses a Householder reflection (`R = I - 2*n*nᵀ`) composed with a
/// translation that accounts for the plane's offset from the world origin.
/// Shared between the B-rep path (`solid_mirror`) and the mesh-only path
/// (`mesh_transform`), since both need the same matrix.
pub fn mirror_matrix(origin: Point3, normal: Vector3) -> Matrix4 {
    use truck_modeling::InnerSpace;
    let n = normal.normalize();
    #[rustfmt::skip]
    let reflection = Matrix4::new(
        1.0 - 2.0 * n.x * n.x, -2.0 * n.x * n.y,       -2.0 * n.x * n.z,       0.0,
        -2.0 * n.y * n.x,       1.0 - 2.0 * n.y * n.y,  -2.0 * n.y * n.z,       0.0,
        -2.0 * n.z * n.x,       -2.0 * n.z * n.y,        1.0 - 2.0 * n.z * n.z, 0.0,
        0.0,                     0.0,                      0.0,                    1.0,
    );
    // Translate so that origin maps to itself under reflection:
    // T = 2 * dot(origin - O, n) * n  where O is world origin
    let d = origin.x * n.x + origin.y * n.y + origin.z * n.z;
    let tx = 2.0 * d * n.x;
    let ty = 2.0 * d * n.y;
    let tz = 2.0 * d * n.z;
    #[rustfmt::skip]
    let translate = Matrix4::new(
        1.0, 0.0, 0.0, tx,
        0.0, 1.0, 0.0, ty,
        0.0, 0.0, 1.0, tz,
        0.0, 0.0, 0.0, 1.0,
    );
    translate * reflection
}

/// Mirror a solid across a plane defined by `origin` and `normal`.
pub fn solid_mirror(solid: &TruckSolid, origin: Point3, normal: Vector3) -> TruckSolid {
    builder::transformed(solid, mirror_matrix(origin, normal))
}

/// Build the affine matrix for a rotation around an axis through `origin`,
/// for use on mesh-only solids where `builder::rotated` no longer applies.
///
/// Built from the Rodrigues rotation formula rather than a `Rotation3`
/// constructor, to stay within the small set of truck/cgmath re-exports
/// this crate already relies on (`Matrix4`, `EuclideanSpace`, `InnerSpace`).
pub fn rotation_matrix(origin: Point3, axis: Vector3, angle_rad: f64) -> Matrix4 {
    use truck_modeling::{EuclideanSpace, InnerSpace};
    let k = axis.normalize();
    let (sin, cos) = angle_rad.sin_cos();
    let one_minus_cos = 1.0 - cos;
    #[rustfmt::skip]
    let rotate = Matrix4::new(
        cos + k.x * k.x * one_minus_cos,         k.x * k.y * one_minus_cos + k.z * sin,    k.x * k.z * one_minus_cos - k.y * sin,    0.0,
        k.y * k.x * one_minus_cos - k.z * sin,   cos + k.y * k.y * one_minus_cos,          k.y * k.z * one_minus_cos + k.x * sin,    0.0,
        k.z * k.x * one_minus_cos + k.y * sin,   k.z * k.y * one_minus_cos - k.x * sin,    cos + k.z * k.z * one_minus_cos,          0.0,
        0.0,                                      0.0,                                       0.0,                                       1.0,
    );
    let translate_to_origin = Matrix4::from_translation(Point3::origin() - origin);
    let translate_back = Matrix4::from_translation(origin - Point3::origin());
    translate_back * rotate * translate_to_origin
}

/// Build the affine matrix for a non-uniform scale about `center`, for use
/// on mesh-only solids.
pub fn scale_matrix(center: Point3, factors: Vector3) -> Matrix4 {
    use truck_modeling::EuclideanSpace;
    let translate_to_origin = Matrix4::from_translation(Point3::origin() - center);
    let scale = Matrix4::from_nonuniform_scale(factors.x, factors.y, factors.z);
    let translate_back = Matrix4::from_translation(center - Point3::origin());
    translate_back * scale * translate_to_origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;
    use std::f64::consts::FRAC_PI_2;
    use truck_modeling::EuclideanSpace;

    #[test]
    fn translate_shifts_solid() {
        let solid = make_box(1.0, 1.0, 1.0);
        let moved = solid_translate(&solid, Vector3::new(10.0, 0.0, 0.0));
        assert!(!moved.boundaries().is_empty());
    }

    #[test]
    fn rotate_preserves_topology() {
        let solid = make_box(1.0, 1.0, 1.0);
        let rotated = solid_rotate(&solid, Point3::origin(), Vector3::unit_z(), FRAC_PI_2);
        assert_eq!(
            solid.boundaries().len(),
            rotated.boundaries().len(),
            "rotation should preserve shell count"
        );
    }

    #[test]
    fn scale_changes_size() {
        let solid = make_box(1.0, 1.0, 1.0);
        let scaled = solid_scale(&solid, Point3::origin(), 2.0);
        assert!(!scaled.boundaries().is_empty());
    }

    #[test]
    fn mirror_produces_valid_solid() {
        let solid = make_box(1.0, 1.0, 1.0);
        let mirrored = solid_mirror(&solid, Point3::origin(), Vector3::unit_x());
        assert!(!mirrored.boundaries().is_empty());
    }

    #[test]
    fn nonuniform_scale_produces_valid_solid() {
        let solid = make_box(1.0, 1.0, 1.0);
        let scaled = solid_scale_nonuniform(&solid, Point3::origin(), Vector3::new(2.0, 3.0, 1.0));
        assert!(!scaled.boundaries().is_empty());
    }

    #[test]
    fn mesh_transform_moves_positions() {
        let solid = make_box(10.0, 10.0, 10.0);
        let mesh = crate::tessellate::mesh_solid(&solid, 0.1);
        let moved = mesh_transform(&mesh, Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0)));
        assert_eq!(mesh.positions().len(), moved.positions().len());
        assert_ne!(mesh.positions()[0], moved.positions()[0]);
    }
}

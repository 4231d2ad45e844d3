//! `TruckBackend` — the truck-backed implementation of `GeometryBackend`.

use std::path::Path;

use truck_modeling::EuclideanSpace;
use truck_polymesh::{Faces, PolygonMesh, StandardAttributes};

use crate::kernel::GeometryBackend;
use crate::types::{BoundingBox, SolidRepr, TruckWire};
use crate::{
    Edge, Face, GeomError, GeomErrorKind, GeomResult, Mesh, Point3, Solid, Vector3, Wire,
    DEFAULT_TOLERANCE,
};

/// Stateless geometry kernel backed by the **truck** B-rep library.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruckBackend;

impl TruckBackend {
    fn tessellate_repr(&self, solid: &Solid, tolerance: f64) -> PolygonMesh {
        match &solid.0 {
            SolidRepr::BRep(b) => crate::tessellate::mesh_solid(b, tolerance),
            SolidRepr::Mesh(m) => m.clone(),
            SolidRepr::Empty => PolygonMesh::default(),
        }
    }
}

impl GeometryBackend for TruckBackend {
    fn box_solid(&self, size_x: f64, size_y: f64, size_z: f64) -> GeomResult<Solid> {
        require_positive(&[("size_x", size_x), ("size_y", size_y), ("size_z", size_z)])?;
        Ok(Solid::from_truck(crate::primitives::make_box(size_x, size_y, size_z)))
    }

    fn cylinder(&self, radius: f64, height: f64) -> GeomResult<Solid> {
        require_positive(&[("radius", radius), ("height", height)])?;
        Ok(Solid::from_truck(crate::primitives::make_cylinder(radius, height)))
    }

    fn sphere(&self, radius: f64) -> GeomResult<Solid> {
        require_positive(&[("radius", radius)])?;
        Ok(Solid::from_truck(crate::primitives::make_sphere(radius)))
    }

    fn cone(&self, base_radius: f64, top_radius: f64, height: f64) -> GeomResult<Solid> {
        require_positive(&[("base_radius", base_radius), ("height", height)])?;
        if top_radius < 0.0 {
            return Err(GeomError::new(GeomErrorKind::InvalidInput, "top_radius must not be negative"));
        }
        Ok(Solid::from_truck(crate::primitives::make_cone(base_radius, top_radius, height)))
    }

    fn torus(&self, major_radius: f64, minor_radius: f64) -> GeomResult<Solid> {
        require_positive(&[("major_radius", major_radius), ("minor_radius", minor_radius)])?;
        if minor_radius >= major_radius {
            return Err(GeomError::new(
                GeomErrorKind::InvalidInput,
                "torus minor_radius must be smaller than major_radius",
            ));
        }
        Ok(Solid::from_truck(crate::primitives::make_torus(major_radius, minor_radius)))
    }

    fn planar_face(&self, profile: &Wire) -> GeomResult<Face> {
        truck_modeling::builder::try_attach_plane(&[profile.inner().clone()])
            .map(Face::from_truck)
            .map_err(|_| GeomError::new(GeomErrorKind::DegenerateGeometry, "profile is not planar"))
    }

    fn extrude(&self, profile: &Face, direction: Vector3) -> GeomResult<Solid> {
        Ok(Solid::from_truck(crate::sweep::solid_sweep(profile.inner(), direction)))
    }

    fn revolve(&self, profile: &Face, origin: Point3, axis: Vector3, angle_rad: f64) -> GeomResult<Solid> {
        Ok(Solid::from_truck(crate::sweep::solid_revolve(profile.inner(), origin, axis, angle_rad)))
    }

    fn loft(&self, profiles: &[Wire]) -> GeomResult<Solid> {
        let wires: Vec<TruckWire> = profiles.iter().map(|w| w.inner().clone()).collect();
        crate::sweep::solid_loft(&wires).map(Solid::from_truck)
    }

    fn union(&self, a: &Solid, b: &Solid) -> GeomResult<Solid> {
        match (&a.0, &b.0) {
            (SolidRepr::Empty, _) => Ok(b.clone()),
            (_, SolidRepr::Empty) => Ok(a.clone()),
            (SolidRepr::BRep(ab), SolidRepr::BRep(bb)) => {
                match crate::boolean::solid_union(ab, bb, DEFAULT_TOLERANCE) {
                    Some(s) => Ok(Solid::from_truck(s)),
                    None => {
                        // Fall back to a mesh-level union: concatenate both
                        // tessellations. Not a clean boolean, but it never
                        // silently drops geometry the way failing outright
                        // would.
                        let ma = crate::tessellate::mesh_solid(ab, DEFAULT_TOLERANCE);
                        let mb = crate::tessellate::mesh_solid(bb, DEFAULT_TOLERANCE);
                        Ok(Solid::from_mesh_repr(concat_meshes(&ma, &mb)))
                    }
                }
            }
            _ => {
                let ma = self.tessellate_repr(a, DEFAULT_TOLERANCE);
                let mb = self.tessellate_repr(b, DEFAULT_TOLERANCE);
                Ok(Solid::from_mesh_repr(concat_meshes(&ma, &mb)))
            }
        }
    }

    fn difference(&self, a: &Solid, b: &Solid) -> GeomResult<Solid> {
        match (&a.0, &b.0) {
            (SolidRepr::Empty, _) => Ok(Solid::empty()),
            (_, SolidRepr::Empty) => Ok(a.clone()),
            (SolidRepr::BRep(ab), SolidRepr::BRep(bb)) => {
                crate::boolean::solid_difference(ab, bb, DEFAULT_TOLERANCE)
                    .map(Solid::from_truck)
                    .ok_or_else(|| GeomError::new(GeomErrorKind::BooleanFailed, "difference failed"))
            }
            _ => Err(GeomError::new(
                GeomErrorKind::Unsupported,
                "difference requires both operands to still carry a B-rep representation",
            )),
        }
    }

    fn intersection(&self, a: &Solid, b: &Solid) -> GeomResult<Solid> {
        match (&a.0, &b.0) {
            (SolidRepr::Empty, _) | (_, SolidRepr::Empty) => Ok(Solid::empty()),
            (SolidRepr::BRep(ab), SolidRepr::BRep(bb)) => {
                crate::boolean::solid_intersection(ab, bb, DEFAULT_TOLERANCE)
                    .map(Solid::from_truck)
                    .ok_or_else(|| GeomError::new(GeomErrorKind::BooleanFailed, "intersection failed"))
            }
            _ => Err(GeomError::new(
                GeomErrorKind::Unsupported,
                "intersection requires both operands to still carry a B-rep representation",
            )),
        }
    }

    fn translate(&self, solid: &Solid, v: Vector3) -> GeomResult<Solid> {
        match &solid.0 {
            SolidRepr::Empty => Ok(Solid::empty()),
            SolidRepr::BRep(b) => Ok(Solid::from_truck(crate::transform::solid_translate(b, v))),
            SolidRepr::Mesh(m) => {
                let matrix = truck_modeling::Matrix4::from_translation(v);
                Ok(Solid::from_mesh_repr(crate::transform::mesh_transform(m, matrix)))
            }
        }
    }

    fn rotate(&self, solid: &Solid, origin: Point3, axis: Vector3, angle_rad: f64) -> GeomResult<Solid> {
        match &solid.0 {
            SolidRepr::Empty => Ok(Solid::empty()),
            SolidRepr::BRep(b) => {
                Ok(Solid::from_truck(crate::transform::solid_rotate(b, origin, axis, angle_rad)))
            }
            SolidRepr::Mesh(m) => {
                let matrix = crate::transform::rotation_matrix(origin, axis, angle_rad);
                Ok(Solid::from_mesh_repr(crate::transform::mesh_transform(m, matrix)))
            }
        }
    }

    fn scale(&self, solid: &Solid, center: Point3, factors: Vector3) -> GeomResult<Solid> {
        require_positive(&[("scale.x", factors.x), ("scale.y", factors.y), ("scale.z", factors.z)])?;
        match &solid.0 {
            SolidRepr::Empty => Ok(Solid::empty()),
            SolidRepr::BRep(b) => {
                Ok(Solid::from_truck(crate::transform::solid_scale_nonuniform(b, center, factors)))
            }
            SolidRepr::Mesh(m) => {
                let matrix = crate::transform::scale_matrix(center, factors);
                Ok(Solid::from_mesh_repr(crate::transform::mesh_transform(m, matrix)))
            }
        }
    }

    fn mirror(&self, solid: &Solid, origin: Point3, normal: Vector3) -> GeomResult<Solid> {
        match &solid.0 {
            SolidRepr::Empty => Ok(Solid::empty()),
            SolidRepr::BRep(b) => Ok(Solid::from_truck(crate::transform::solid_mirror(b, origin, normal))),
            SolidRepr::Mesh(m) => {
                let matrix = crate::transform::mirror_matrix(origin, normal);
                Ok(Solid::from_mesh_repr(crate::transform::mesh_transform(m, matrix)))
            }
        }
    }

    fn fillet(&self, solid: &Solid, radius: f64) -> GeomResult<Solid> {
        let mesh = self.tessellate_repr(solid, DEFAULT_TOLERANCE);
        crate::finishing::fillet_mesh(&mesh, radius, 3).map(Solid::from_mesh_repr)
    }

    fn chamfer(&self, solid: &Solid, distance: f64) -> GeomResult<Solid> {
        let mesh = self.tessellate_repr(solid, DEFAULT_TOLERANCE);
        crate::finishing::chamfer_mesh(&mesh, distance).map(Solid::from_mesh_repr)
    }

    fn shell(&self, solid: &Solid, thickness: f64) -> GeomResult<Solid> {
        let mesh = self.tessellate_repr(solid, DEFAULT_TOLERANCE);
        crate::finishing::shell_mesh(&mesh, thickness).map(Solid::from_mesh_repr)
    }

    fn hull(&self, solids: &[Solid]) -> GeomResult<Solid> {
        crate::hull::convex_hull(solids, DEFAULT_TOLERANCE)
    }

    fn bounding_box(&self, solid: &Solid) -> GeomResult<BoundingBox> {
        match &solid.0 {
            SolidRepr::Empty => Ok(BoundingBox::new(Point3::origin(), Point3::origin())),
            SolidRepr::BRep(b) => Ok(crate::query::bounding_box(b, DEFAULT_TOLERANCE)),
            SolidRepr::Mesh(m) => Ok(mesh_bounding_box(m)),
        }
    }

    fn select_faces(&self, solid: &Solid, selector: &str) -> GeomResult<Vec<Face>> {
        let brep = solid.as_brep().ok_or_else(|| {
            GeomError::new(
                GeomErrorKind::Unsupported,
                "face selection requires a solid that still carries a B-rep representation",
            )
        })?;
        crate::select::select_faces(brep, selector)
            .map(|faces| faces.into_iter().cloned().map(Face::from_truck).collect())
    }

    fn select_edges(&self, solid: &Solid, selector: &str) -> GeomResult<Vec<Edge>> {
        let brep = solid.as_brep().ok_or_else(|| {
            GeomError::new(
                GeomErrorKind::Unsupported,
                "edge selection requires a solid that still carries a B-rep representation",
            )
        })?;
        crate::select::select_edges(brep, selector)
            .map(|edges| edges.into_iter().map(Edge::from_truck).collect())
    }

    fn face_center(&self, face: &Face) -> Point3 {
        crate::query::face_center(face.inner())
    }

    fn face_normal(&self, face: &Face) -> GeomResult<Vector3> {
        crate::query::face_normal(face.inner())
    }

    fn edge_point_at(&self, edge: &Edge, t: f64) -> Point3 {
        crate::query::edge_point_at(edge.inner(), t)
    }

    fn edge_tangent_at(&self, edge: &Edge, t: f64) -> GeomResult<Vector3> {
        crate::query::edge_tangent_at(edge.inner(), t)
    }

    fn tessellate(&self, solid: &Solid, tolerance: f64) -> Mesh {
        Mesh::from_polygon(self.tessellate_repr(solid, tolerance))
    }

    fn export_stl(&self, mesh: &Mesh, path: &Path) -> GeomResult<()> {
        crate::tessellate::write_stl(mesh.inner(), path)
    }
}

fn require_positive(values: &[(&str, f64)]) -> GeomResult<()> {
    for (name, v) in values {
        if *v <= 0.0 {
            return Err(GeomError::new(
                GeomErrorKind::InvalidInput,
                format!("{name} must be positive, got {v}"),
            ));
        }
    }
    Ok(())
}

fn mesh_bounding_box(mesh: &PolygonMesh) -> BoundingBox {
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

fn concat_meshes(a: &PolygonMesh, b: &PolygonMesh) -> PolygonMesh {
    let offset = a.positions().len();
    let mut positions = a.positions().to_vec();
    positions.extend_from_slice(b.positions());

    let mut faces: Vec<[truck_polymesh::StandardVertex; 3]> = a
        .tri_faces()
        .iter()
        .map(|f| [f[0], f[1], f[2]])
        .collect();
    faces.extend(b.tri_faces().iter().map(|f| {
        [
            truck_polymesh::StandardVertex { pos: f[0].pos + offset, uv: None, nor: None },
            truck_polymesh::StandardVertex { pos: f[1].pos + offset, uv: None, nor: None },
            truck_polymesh::StandardVertex { pos: f[2].pos + offset, uv: None, nor: None },
        ]
    }));

    let attrs = StandardAttributes {
        positions,
        uv_coords: Vec::new(),
        normals: Vec::new(),
    };
    PolygonMesh::new(attrs, Faces::from_iter(faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn primitives_round_trip_through_backend() {
        let backend = TruckBackend;
        let b = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        assert!(b.is_brep());
        let c = backend.cylinder(5.0, 10.0).unwrap();
        assert!(c.is_brep());
        let s = backend.sphere(5.0).unwrap();
        assert!(s.is_brep());
        let cone = backend.cone(5.0, 0.0, 10.0).unwrap();
        assert!(cone.is_brep());
        let torus = backend.torus(10.0, 2.0).unwrap();
        assert!(torus.is_brep());
    }

    #[test]
    fn invalid_primitive_dimensions_rejected() {
        let backend = TruckBackend;
        let err = backend.box_solid(0.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err.kind, GeomErrorKind::InvalidInput);
    }

    #[test]
    fn union_of_overlapping_boxes() {
        let backend = TruckBackend;
        let a = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let b = backend.translate(&backend.box_solid(8.0, 8.0, 8.0).unwrap(), Vector3::new(3.0, 3.0, 3.0)).unwrap();
        let result = backend.union(&a, &b).unwrap();
        assert!(result.is_brep() || result.is_mesh_only());
    }

    #[test]
    fn union_with_empty_is_identity() {
        let backend = TruckBackend;
        let a = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let result = backend.union(&a, &Solid::empty()).unwrap();
        assert!(result.is_brep());
    }

    #[test]
    fn fillet_drops_to_mesh() {
        let backend = TruckBackend;
        let b = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let filleted = backend.fillet(&b, 1.0).unwrap();
        assert!(filleted.is_mesh_only());
    }

    #[test]
    fn difference_rejects_mesh_operand() {
        let backend = TruckBackend;
        let b = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let filleted = backend.fillet(&b, 1.0).unwrap();
        let other = backend.box_solid(2.0, 2.0, 2.0).unwrap();
        let err = backend.difference(&filleted, &other).unwrap_err();
        assert_eq!(err.kind, GeomErrorKind::Unsupported);
    }

    #[test]
    fn select_top_face_center_and_normal() {
        let backend = TruckBackend;
        let b = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let faces = backend.select_faces(&b, "top").unwrap();
        assert_eq!(faces.len(), 1);
        let normal = backend.face_normal(&faces[0]).unwrap();
        assert!((normal.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bounding_box_of_translated_box() {
        let backend = TruckBackend;
        let b = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let moved = backend.translate(&b, Vector3::new(5.0, 0.0, 0.0)).unwrap();
        let bbox = backend.bounding_box(&moved).unwrap();
        assert!(bbox.min.x >= 4.5 && bbox.min.x <= 5.5);
    }

    #[test]
    fn revolve_full_circle_produces_solid() {
        let backend = TruckBackend;
        let v0 = truck_modeling::builder::vertex(Point3::new(3.0, 0.0, 0.0));
        let v1 = truck_modeling::builder::vertex(Point3::new(5.0, 0.0, 0.0));
        let v2 = truck_modeling::builder::vertex(Point3::new(5.0, 0.0, 2.0));
        let v3 = truck_modeling::builder::vertex(Point3::new(3.0, 0.0, 2.0));
        let wire = truck_modeling::Wire::from(vec![
            truck_modeling::builder::line(&v0, &v1),
            truck_modeling::builder::line(&v1, &v2),
            truck_modeling::builder::line(&v2, &v3),
            truck_modeling::builder::line(&v3, &v0),
        ]);
        let face = backend.planar_face(&Wire::from_truck(wire)).unwrap();
        let solid = backend
            .revolve(&face, Point3::origin(), Vector3::unit_z(), 2.0 * PI)
            .unwrap();
        assert!(solid.is_brep());
    }
}

//! Convex hull over a set of solids, via the `chull` crate.

use chull::ConvexHullWrapper;
use truck_polymesh::{Faces, PolygonMesh, StandardAttributes, StandardVertex};

use crate::error::{GeomError, GeomErrorKind, GeomResult};
use crate::tessellate::mesh_solid;
use crate::types::{Point3, Solid};

/// Compute the convex hull of the tessellated union of `solids`.
///
/// The result always drops to a mesh-only [`Solid`] — a convex hull has no
/// natural B-rep in this workspace's kernel binding.
pub fn convex_hull(solids: &[Solid], tolerance: f64) -> GeomResult<Solid> {
    if solids.is_empty() {
        return Err(GeomError::new(
            GeomErrorKind::InvalidInput,
            "hull requires at least one solid",
        ));
    }
    let mut points: Vec<Vec<f64>> = Vec::new();
    for solid in solids {
        if let Some(brep) = solid.as_brep() {
            let mesh = mesh_solid(brep, tolerance);
            points.extend(mesh.positions().iter().map(|p| vec![p.x, p.y, p.z]));
        } else if let Some(mesh) = solid.as_mesh() {
            points.extend(mesh.positions().iter().map(|p| vec![p.x, p.y, p.z]));
        }
    }
    if points.len() < 4 {
        return Err(GeomError::new(
            GeomErrorKind::DegenerateGeometry,
            "hull needs at least 4 non-coplanar points",
        ));
    }

    let hull = ConvexHullWrapper::try_new(&points, None).map_err(|e| {
        GeomError::new(
            GeomErrorKind::DegenerateGeometry,
            format!("convex hull computation failed: {e:?}"),
        )
    })?;
    let (vertices, indices) = hull.vertices_indices();

    let positions: Vec<Point3> = vertices
        .iter()
        .map(|v| Point3::new(v[0], v[1], v[2]))
        .collect();
    let faces: Vec<[StandardVertex; 3]> = indices
        .chunks(3)
        .filter(|c| c.len() == 3)
        .map(|c| {
            [
                StandardVertex { pos: c[0], uv: None, nor: None },
                StandardVertex { pos: c[1], uv: None, nor: None },
                StandardVertex { pos: c[2], uv: None, nor: None },
            ]
        })
        .collect();

    let attrs = StandardAttributes {
        positions,
        uv_coords: Vec::new(),
        normals: Vec::new(),
    };
    let mesh = PolygonMesh::new(attrs, Faces::from_iter(faces));
    Ok(Solid::from_mesh_repr(mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;

    #[test]
    fn hull_of_two_boxes_is_mesh_only() {
        let a = Solid::from_truck(make_box(10.0, 10.0, 10.0));
        let b = Solid::from_truck(make_box(5.0, 5.0, 5.0));
        let hull = convex_hull(&[a, b], 0.1).expect("hull should succeed");
        assert!(hull.is_mesh_only());
    }

    #[test]
    fn hull_of_nothing_errors() {
        let err = convex_hull(&[], 0.1).unwrap_err();
        assert_eq!(err.kind, GeomErrorKind::InvalidInput);
    }
}

//! Mesh-level finishing operations: fillet, chamfer, shell.
//!
//! The truck binding used by this crate does not expose general B-rep edge
//! blending (the half-edge walk a true fillet/chamfer needs is a
//! considerably larger undertaking than this workspace's kernel trait
//! surface). Finishing operations therefore tessellate their input and work
//! on the resulting triangle mesh directly, the same way a solid that has
//! already gone through a finishing op or a hull stays mesh-only for the
//! rest of the build (see [`crate::types::SolidRepr`]).

use std::collections::HashSet;

use truck_modeling::{EuclideanSpace, InnerSpace, Point3, Vector3};
use truck_polymesh::{Faces, PolygonMesh, StandardAttributes, StandardVertex};

use crate::error::{GeomError, GeomErrorKind, GeomResult};

/// Round sharp edges of `mesh` by relaxing vertex positions toward their
/// neighborhood average, proportionally to `radius`.
///
/// This is a Laplacian smoothing pass, not an exact constant-radius blend:
/// it softens corners without changing the mesh's triangle topology.
pub fn fillet_mesh(mesh: &PolygonMesh, radius: f64, iterations: u32) -> GeomResult<PolygonMesh> {
    if radius <= 0.0 {
        return Err(GeomError::new(
            GeomErrorKind::InvalidInput,
            "fillet radius must be positive",
        ));
    }
    Ok(smooth_positions(mesh, radius.min(mesh_diagonal(mesh) * 0.25), iterations))
}

/// Bevel sharp edges of `mesh` by a fixed `distance`.
///
/// Implemented as a single, stronger smoothing pass — a cheaper
/// approximation than `fillet_mesh`'s iterative relaxation, matching a
/// chamfer's flat (rather than rounded) bevel in spirit if not in exact
/// geometry.
pub fn chamfer_mesh(mesh: &PolygonMesh, distance: f64) -> GeomResult<PolygonMesh> {
    if distance <= 0.0 {
        return Err(GeomError::new(
            GeomErrorKind::InvalidInput,
            "chamfer distance must be positive",
        ));
    }
    Ok(smooth_positions(mesh, distance.min(mesh_diagonal(mesh) * 0.25), 1))
}

/// Hollow out `mesh` into a shell of the given wall `thickness`.
///
/// Produces a second, inward-offset copy of the surface with reversed
/// winding and merges it with the original — the outer wall stays exactly
/// as tessellated, the inner wall approximates a constant-thickness cavity
/// by offsetting each vertex along its averaged face normal.
pub fn shell_mesh(mesh: &PolygonMesh, thickness: f64) -> GeomResult<PolygonMesh> {
    if thickness <= 0.0 {
        return Err(GeomError::new(
            GeomErrorKind::InvalidInput,
            "shell thickness must be positive",
        ));
    }
    let positions = mesh.positions();
    let triangles = triangle_indices(mesh);
    if positions.is_empty() || triangles.is_empty() {
        return Err(GeomError::new(
            GeomErrorKind::DegenerateGeometry,
            "cannot shell an empty mesh",
        ));
    }
    let normals = vertex_normals(positions, &triangles);
    let inner_positions: Vec<Point3> = positions
        .iter()
        .zip(&normals)
        .map(|(p, n)| p - n * thickness)
        .collect();

    let outer_count = positions.len();
    let mut merged_positions = positions.to_vec();
    merged_positions.extend(inner_positions);

    let mut faces = Vec::with_capacity(triangles.len() * 2);
    for [a, b, c] in &triangles {
        faces.push([vertex(*a), vertex(*b), vertex(*c)]);
    }
    for [a, b, c] in &triangles {
        // Reverse winding so the inner wall's normal points into the cavity.
        faces.push([
            vertex(outer_count + c),
            vertex(outer_count + b),
            vertex(outer_count + a),
        ]);
    }

    build_mesh(merged_positions, faces)
}

fn vertex(pos: usize) -> StandardVertex {
    StandardVertex {
        pos,
        uv: None,
        nor: None,
    }
}

fn build_mesh(positions: Vec<Point3>, faces: Vec<[StandardVertex; 3]>) -> GeomResult<PolygonMesh> {
    let attrs = StandardAttributes {
        positions,
        uv_coords: Vec::new(),
        normals: Vec::new(),
    };
    let faces = Faces::from_iter(faces);
    Ok(PolygonMesh::new(attrs, faces))
}

fn triangle_indices(mesh: &PolygonMesh) -> Vec<[usize; 3]> {
    mesh.tri_faces()
        .iter()
        .map(|f| [f[0].pos, f[1].pos, f[2].pos])
        .collect()
}

fn vertex_normals(positions: &[Point3], triangles: &[[usize; 3]]) -> Vec<Vector3> {
    let mut accum = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];
    for [a, b, c] in triangles {
        let (pa, pb, pc) = (positions[*a], positions[*b], positions[*c]);
        let n = (pb - pa).cross(pc - pa);
        accum[*a] += n;
        accum[*b] += n;
        accum[*c] += n;
    }
    accum
        .into_iter()
        .map(|n| {
            if n.magnitude() < 1e-12 {
                Vector3::new(0.0, 0.0, 1.0)
            } else {
                n.normalize()
            }
        })
        .collect()
}

fn adjacency(triangles: &[[usize; 3]], vertex_count: usize) -> Vec<HashSet<usize>> {
    let mut adj = vec![HashSet::new(); vertex_count];
    for [a, b, c] in triangles {
        adj[*a].insert(*b);
        adj[*a].insert(*c);
        adj[*b].insert(*a);
        adj[*b].insert(*c);
        adj[*c].insert(*a);
        adj[*c].insert(*b);
    }
    adj
}

fn mesh_diagonal(mesh: &PolygonMesh) -> f64 {
    let positions = mesh.positions();
    if positions.is_empty() {
        return 0.0;
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
    (max - min).magnitude()
}

fn smooth_positions(mesh: &PolygonMesh, strength: f64, iterations: u32) -> PolygonMesh {
    let mut positions = mesh.positions().to_vec();
    let triangles = triangle_indices(mesh);
    let adj = adjacency(&triangles, positions.len());
    let diag = mesh_diagonal(mesh).max(1e-9);
    let blend = (strength / diag).clamp(0.0, 0.5);

    for _ in 0..iterations.max(1) {
        let mut next = positions.clone();
        for (i, neighbors) in adj.iter().enumerate() {
            if neighbors.is_empty() {
                continue;
            }
            let sum: Vector3 = neighbors
                .iter()
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, &j| acc + positions[j].to_vec());
            let avg = Point3::from_vec(sum / neighbors.len() as f64);
            next[i] = positions[i] + (avg - positions[i]) * blend;
        }
        positions = next;
    }

    let faces: Vec<[StandardVertex; 3]> = triangles
        .iter()
        .map(|[a, b, c]| [vertex(*a), vertex(*b), vertex(*c)])
        .collect();
    build_mesh(positions, faces).expect("rebuilt mesh from existing topology is always valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;
    use crate::tessellate::mesh_solid;

    #[test]
    fn fillet_preserves_vertex_count() {
        let solid = make_box(10.0, 10.0, 10.0);
        let mesh = mesh_solid(&solid, 0.1);
        let filleted = fillet_mesh(&mesh, 1.0, 3).expect("fillet should succeed");
        assert_eq!(filleted.positions().len(), mesh.positions().len());
    }

    #[test]
    fn chamfer_preserves_vertex_count() {
        let solid = make_box(10.0, 10.0, 10.0);
        let mesh = mesh_solid(&solid, 0.1);
        let chamfered = chamfer_mesh(&mesh, 1.0).expect("chamfer should succeed");
        assert_eq!(chamfered.positions().len(), mesh.positions().len());
    }

    #[test]
    fn shell_doubles_the_wall() {
        let solid = make_box(10.0, 10.0, 10.0);
        let mesh = mesh_solid(&solid, 0.1);
        let shelled = shell_mesh(&mesh, 1.0).expect("shell should succeed");
        assert_eq!(shelled.positions().len(), mesh.positions().len() * 2);
        assert_eq!(shelled.tri_faces().len(), mesh.tri_faces().len() * 2);
    }

    #[test]
    fn negative_radius_rejected() {
        let solid = make_box(5.0, 5.0, 5.0);
        let mesh = mesh_solid(&solid, 0.1);
        let err = fillet_mesh(&mesh, -1.0, 1).unwrap_err();
        assert_eq!(err.kind, GeomErrorKind::InvalidInput);
    }
}

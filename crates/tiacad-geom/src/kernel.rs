//! The `GeometryBackend` trait — geometry kernel abstraction.
//!
//! `TruckBackend` (in [`crate::truck_kernel`]) is the default and only
//! implementation shipped in this crate; the trait exists so that
//! `tiacad-ops` never depends on truck types directly, keeping the kernel
//! trait separate from its truck-backed implementation.

use std::path::Path;

use crate::types::{BoundingBox, Edge, Face, Point3, Solid, Vector3, Wire};
use crate::{GeomResult, Mesh};

/// Abstraction over a geometry kernel that provides solid modeling
/// operations: primitives, sketch-to-solid, booleans, transforms, finishing,
/// selection, queries, and tessellation.
pub trait GeometryBackend {
    // ── Primitives ──────────────────────────────────────────────────────

    /// Create an axis-aligned box with its corner at the origin.
    fn box_solid(&self, size_x: f64, size_y: f64, size_z: f64) -> GeomResult<Solid>;

    /// Create a cylinder along the Z axis, base at the origin.
    fn cylinder(&self, radius: f64, height: f64) -> GeomResult<Solid>;

    /// Create a sphere centered at the origin.
    fn sphere(&self, radius: f64) -> GeomResult<Solid>;

    /// Create a cone (or frustum, if `top_radius` is nonzero) along the Z
    /// axis, base at the origin.
    fn cone(&self, base_radius: f64, top_radius: f64, height: f64) -> GeomResult<Solid>;

    /// Create a torus centered at the origin, lying in the XY plane.
    fn torus(&self, major_radius: f64, minor_radius: f64) -> GeomResult<Solid>;

    // ── Sketch-to-solid ──────────────────────────────────────────────────

    /// Build a planar face from a closed sketch profile (a wire already
    /// lying in a single plane).
    fn planar_face(&self, profile: &Wire) -> GeomResult<Face>;

    /// Translational extrude of a planar face along a direction vector.
    fn extrude(&self, profile: &Face, direction: Vector3) -> GeomResult<Solid>;

    /// Rotational sweep (revolve) of a planar face around an axis.
    fn revolve(&self, profile: &Face, origin: Point3, axis: Vector3, angle_rad: f64)
        -> GeomResult<Solid>;

    /// Sweep a planar face's profile along an arbitrary direction (alias of
    /// `extrude`, kept distinct at the trait level because `spec`'s sweep
    /// operation allows a non-straight path in principle; this backend
    /// supports the straight-path case).
    fn sweep(&self, profile: &Face, direction: Vector3) -> GeomResult<Solid> {
        self.extrude(profile, direction)
    }

    /// Loft a solid through an ordered sequence of wire profiles.
    fn loft(&self, profiles: &[Wire]) -> GeomResult<Solid>;

    // ── Boolean operations ──────────────────────────────────────────────

    /// Boolean union of two solids.
    fn union(&self, a: &Solid, b: &Solid) -> GeomResult<Solid>;

    /// Boolean difference: `a` minus `b`.
    fn difference(&self, a: &Solid, b: &Solid) -> GeomResult<Solid>;

    /// Boolean intersection of two solids.
    fn intersection(&self, a: &Solid, b: &Solid) -> GeomResult<Solid>;

    /// Union of many solids (default: left fold, starting from the empty
    /// solid so an empty slice yields the empty solid rather than an error).
    fn union_many(&self, solids: &[Solid]) -> GeomResult<Solid> {
        let mut iter = solids.iter();
        let Some(first) = iter.next() else {
            return Ok(Solid::empty());
        };
        iter.try_fold(first.clone(), |acc, s| self.union(&acc, s))
    }

    // ── Transformations ─────────────────────────────────────────────────

    /// Translate a solid by a vector.
    fn translate(&self, solid: &Solid, v: Vector3) -> GeomResult<Solid>;

    /// Rotate a solid around an axis through `origin`.
    fn rotate(&self, solid: &Solid, origin: Point3, axis: Vector3, angle_rad: f64) -> GeomResult<Solid>;

    /// Non-uniformly scale a solid about `center`.
    fn scale(&self, solid: &Solid, center: Point3, factors: Vector3) -> GeomResult<Solid>;

    /// Mirror a solid across a plane defined by `origin` and `normal`.
    fn mirror(&self, solid: &Solid, origin: Point3, normal: Vector3) -> GeomResult<Solid>;

    // ── Finishing ────────────────────────────────────────────────────────

    /// Round all edges of a solid by `radius`. Drops the solid to a
    /// mesh-only representation.
    fn fillet(&self, solid: &Solid, radius: f64) -> GeomResult<Solid>;

    /// Bevel all edges of a solid by `distance`. Drops the solid to a
    /// mesh-only representation.
    fn chamfer(&self, solid: &Solid, distance: f64) -> GeomResult<Solid>;

    /// Hollow a solid into a constant-thickness shell. Drops the solid to a
    /// mesh-only representation.
    fn shell(&self, solid: &Solid, thickness: f64) -> GeomResult<Solid>;

    /// Convex hull of a set of solids. Always produces a mesh-only solid.
    fn hull(&self, solids: &[Solid]) -> GeomResult<Solid>;

    // ── Queries ──────────────────────────────────────────────────────────

    /// The axis-aligned bounding box of a solid.
    fn bounding_box(&self, solid: &Solid) -> GeomResult<BoundingBox>;

    /// Select faces of a solid matching a selector string. Only defined for
    /// solids that still carry a B-rep representation.
    fn select_faces(&self, solid: &Solid, selector: &str) -> GeomResult<Vec<Face>>;

    /// Select edges of a solid matching a selector string. Only defined for
    /// solids that still carry a B-rep representation.
    fn select_edges(&self, solid: &Solid, selector: &str) -> GeomResult<Vec<Edge>>;

    /// The centroid of a face.
    fn face_center(&self, face: &Face) -> Point3;

    /// The outward unit normal of a face.
    fn face_normal(&self, face: &Face) -> GeomResult<Vector3>;

    /// A point on an edge at parameter `t` in `[0, 1]`.
    fn edge_point_at(&self, edge: &Edge, t: f64) -> Point3;

    /// The tangent direction of an edge at parameter `t`.
    fn edge_tangent_at(&self, edge: &Edge, t: f64) -> GeomResult<Vector3>;

    // ── Tessellation / export ───────────────────────────────────────────

    /// Tessellate a solid into a triangle mesh.
    fn tessellate(&self, solid: &Solid, tolerance: f64) -> Mesh;

    /// Export a mesh to an STL file.
    fn export_stl(&self, mesh: &Mesh, path: &Path) -> GeomResult<()>;
}

//! Core geometry types — opaque wrappers around the truck kernel types.
//!
//! Public API never exposes truck generics directly.

use truck_polymesh::PolygonMesh;

/// A 3D point (re-exported from truck's cgmath-based types).
pub type Point3 = truck_modeling::Point3;
/// A 3D vector (re-exported from truck's cgmath-based types).
pub type Vector3 = truck_modeling::Vector3;

/// Default tolerance for boolean operations and tessellation.
///
/// truck_shapeops requires tolerance >= 1e-6. A small but safe default.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

// ── Truck concrete type aliases (crate-internal) ────────────────────────

/// The concrete truck solid type used throughout this crate.
pub(crate) type TruckSolid = truck_modeling::Solid;
/// The concrete truck wire type.
pub(crate) type TruckWire = truck_modeling::Wire;
/// The concrete truck face type.
pub(crate) type TruckFace = truck_modeling::Face;
/// The concrete truck edge type.
pub(crate) type TruckEdge = truck_modeling::Edge;
/// The concrete truck vertex type.
#[allow(dead_code)]
pub(crate) type TruckVertex = truck_modeling::Vertex;

// ── Public newtype wrappers ─────────────────────────────────────────────

/// The internal representation a [`Solid`] is currently carrying.
///
/// Most operations (primitives, booleans, transforms, sweeps) stay in
/// `BRep`. Finishing operations (fillet, chamfer, shell) and the convex hull
/// operate on the tessellated mesh directly, since this workspace's kernel
/// binding does not expose general B-rep blend operations; a solid that goes
/// through one of those drops to `Mesh` and stays there for the rest of the
/// build (it can still be booleaned against other solids — truck booleans
/// require two B-rep operands, so a boolean against a `Mesh` solid falls
/// back to mesh concatenation for `union`, and is rejected for `difference`/
/// `intersection`).
#[derive(Debug, Clone)]
pub(crate) enum SolidRepr {
    BRep(Box<TruckSolid>),
    Mesh(PolygonMesh),
    Empty,
}

/// An opaque solid body: either an exact B-rep or a tessellated mesh.
#[derive(Debug, Clone)]
pub struct Solid(pub(crate) SolidRepr);

impl Solid {
    /// Wrap a truck B-rep solid.
    pub(crate) fn from_truck(inner: TruckSolid) -> Self {
        Self(SolidRepr::BRep(Box::new(inner)))
    }

    /// Wrap a tessellated mesh solid (produced by finishing ops or hull).
    pub(crate) fn from_mesh_repr(mesh: PolygonMesh) -> Self {
        Self(SolidRepr::Mesh(mesh))
    }

    /// The empty solid (identity element for `union_many` over zero parts).
    pub fn empty() -> Self {
        Self(SolidRepr::Empty)
    }

    /// `true` if this solid still carries an exact B-rep representation.
    pub fn is_brep(&self) -> bool {
        matches!(self.0, SolidRepr::BRep(_))
    }

    /// `true` if this solid has degraded to a mesh-only representation.
    pub fn is_mesh_only(&self) -> bool {
        matches!(self.0, SolidRepr::Mesh(_))
    }

    /// `true` if this solid carries no geometry at all.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, SolidRepr::Empty)
    }

    pub(crate) fn as_brep(&self) -> Option<&TruckSolid> {
        match &self.0 {
            SolidRepr::BRep(b) => Some(b),
            _ => None,
        }
    }

    pub(crate) fn as_mesh(&self) -> Option<&PolygonMesh> {
        match &self.0 {
            SolidRepr::Mesh(m) => Some(m),
            _ => None,
        }
    }
}

/// An opaque wire (connected sequence of edges).
#[derive(Debug, Clone)]
pub struct Wire(pub(crate) TruckWire);

impl Wire {
    pub(crate) fn from_truck(inner: TruckWire) -> Self {
        Self(inner)
    }

    pub(crate) fn inner(&self) -> &TruckWire {
        &self.0
    }
}

/// An opaque face (bounded surface).
#[derive(Debug, Clone)]
pub struct Face(pub(crate) TruckFace);

impl Face {
    pub(crate) fn from_truck(inner: TruckFace) -> Self {
        Self(inner)
    }

    pub(crate) fn inner(&self) -> &TruckFace {
        &self.0
    }
}

/// An opaque edge (bounded curve between two vertices).
#[derive(Debug, Clone)]
pub struct Edge(pub(crate) TruckEdge);

impl Edge {
    pub(crate) fn from_truck(inner: TruckEdge) -> Self {
        Self(inner)
    }

    pub(crate) fn inner(&self) -> &TruckEdge {
        &self.0
    }
}

/// A tessellated polygon mesh, ready for STL/3MF/OBJ export.
#[derive(Debug, Clone)]
pub struct Mesh(pub(crate) PolygonMesh);

impl Mesh {
    pub(crate) fn from_polygon(inner: PolygonMesh) -> Self {
        Self(inner)
    }

    pub(crate) fn inner(&self) -> &PolygonMesh {
        &self.0
    }

    /// Number of vertex positions in the mesh.
    pub fn position_count(&self) -> usize {
        self.0.positions().len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.0.tri_faces().len()
    }

    /// Returns `true` if the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.0.positions().is_empty()
    }

    /// Vertex positions, in mesh-local order.
    pub fn positions(&self) -> &[Point3] {
        self.0.positions()
    }

    /// Triangle vertex-index triples, indexing into [`Mesh::positions`].
    ///
    /// Exporters that need raw mesh data (3MF, OBJ, STEP) read this and
    /// [`Mesh::positions`] rather than the truck mesh type directly.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.0
            .tri_faces()
            .iter()
            .map(|f| [f[0].pos, f[1].pos, f[2].pos])
            .collect()
    }
}

/// An axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// The geometric center of the box.
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// The box's extent along each axis.
    pub fn size(&self) -> Vector3 {
        Vector3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance_value() {
        assert!((DEFAULT_TOLERANCE - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn point3_construction() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
        assert_eq!(p.z, 3.0);
    }

    #[test]
    fn vector3_construction() {
        let v = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(v.x, 4.0);
        assert_eq!(v.y, 5.0);
        assert_eq!(v.z, 6.0);
    }

    #[test]
    fn mesh_accessors_on_tessellated_box() {
        let solid = crate::primitives::make_box(10.0, 10.0, 10.0);
        let poly = crate::tessellate::mesh_solid(&solid, 0.1);
        let mesh = Mesh::from_polygon(poly);
        assert!(mesh.position_count() > 0);
        assert!(mesh.triangle_count() > 0);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn empty_mesh_is_empty() {
        let mesh = Mesh::from_polygon(PolygonMesh::default());
        assert_eq!(mesh.position_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn solid_repr_variants() {
        let brep = Solid::from_truck(crate::primitives::make_box(1.0, 1.0, 1.0));
        assert!(brep.is_brep());
        assert!(!brep.is_mesh_only());

        let mesh = Solid::from_mesh_repr(PolygonMesh::default());
        assert!(mesh.is_mesh_only());

        let empty = Solid::empty();
        assert!(empty.is_empty());
    }

    #[test]
    fn bounding_box_center_and_size() {
        let bbox = BoundingBox::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(3.0, 4.0, 5.0));
        let c = bbox.center();
        assert_eq!((c.x, c.y, c.z), (1.0, 1.0, 1.0));
        let s = bbox.size();
        assert_eq!((s.x, s.y, s.z), (4.0, 6.0, 8.0));
    }
}

//! The abstraction a [`crate::resolver::SpatialResolver`] queries for part
//! state, kept separate from `tiacad-registry` so this crate stays below it
//! in the dependency order: `tiacad-registry::PartRegistry` implements this
//! trait rather than the other way around.

use tiacad_geom::{BoundingBox, Point3, Vector3};

use crate::error::SpatialResult;
use crate::spec::EdgeAt;

/// The coarse primitive shape a part was built from, which determines
/// which auto-generated face references it advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Box,
    Cylinder,
    Sphere,
    Cone,
    Other,
}

/// Read-only access to registered part state, as needed to resolve
/// spatial references.
pub trait PartSource {
    /// The part's current world-space origin.
    fn part_origin(&self, name: &str) -> SpatialResult<Point3>;

    /// The part's current bounding box, recomputed from its present
    /// cumulative transform.
    fn part_bounding_box(&self, name: &str) -> SpatialResult<BoundingBox>;

    /// The coarse kind used to decide which auto-references a part
    /// advertises (e.g. cylinders expose only top/bottom faces).
    fn part_kind(&self, name: &str) -> SpatialResult<PartKind>;

    /// First face matching `selector`, as `(center, outward_normal)`.
    fn select_face(&self, part: &str, selector: &str) -> SpatialResult<(Point3, Vector3)>;

    /// First edge matching `selector`, sampled at `at`, as `(point, tangent)`.
    fn select_edge(
        &self,
        part: &str,
        selector: &str,
        at: EdgeAt,
    ) -> SpatialResult<(Point3, Vector3)>;
}

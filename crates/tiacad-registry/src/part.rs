//! A single registered part: geometry, placement, and metadata.

use tiacad_geom::{Point3, Solid};
use tiacad_spatial::PartKind;
use truck_modeling::{EuclideanSpace, Matrix4, Transform};

use crate::metadata::PartMetadata;

/// A named solid in the registry, with its creation-time origin and the
/// cumulative transform applied to it since.
pub struct Part {
    pub name: String,
    pub solid: Solid,
    pub kind: PartKind,
    pub initial_position: Point3,
    pub cumulative_transform: Matrix4,
    pub metadata: PartMetadata,
}

impl Part {
    pub fn new(name: impl Into<String>, solid: Solid, kind: PartKind, metadata: PartMetadata) -> Self {
        let initial_position = Point3::origin();
        Self {
            name: name.into(),
            solid,
            kind,
            initial_position,
            cumulative_transform: Matrix4::from_nonuniform_scale(1.0, 1.0, 1.0),
            metadata,
        }
    }

    pub fn with_initial_position(mut self, position: Point3) -> Self {
        self.initial_position = position;
        self
    }

    /// `cumulative_transform * initial_position`, per the part invariant.
    pub fn current_position(&self) -> Point3 {
        self.cumulative_transform
            .transform_point(self.initial_position)
    }

    /// Record a transform step: left-multiply the cumulative matrix. The
    /// caller is responsible for applying the same matrix to `self.solid`
    /// via the geometry backend.
    pub fn accumulate_transform(&mut self, step: Matrix4) {
        self.cumulative_transform = step * self.cumulative_transform;
    }

    /// Swap this part's geometry handle in place (fillet/chamfer/shell).
    /// The cumulative transform and initial position are untouched — the
    /// part's name and placement survive a finishing operation.
    pub fn replace_geometry(&mut self, solid: Solid) {
        self.solid = solid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::Vector3;

    fn empty_part() -> Part {
        Part::new("p", Solid::empty(), PartKind::Other, PartMetadata::new("box"))
    }

    #[test]
    fn current_position_matches_invariant() {
        let mut part = empty_part().with_initial_position(Point3::new(1.0, 0.0, 0.0));
        assert_eq!(part.current_position(), Point3::new(1.0, 0.0, 0.0));
        part.accumulate_transform(Matrix4::from_translation(Vector3::new(0.0, 2.0, 0.0)));
        assert_eq!(part.current_position(), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn replace_geometry_keeps_placement() {
        let mut part = empty_part().with_initial_position(Point3::new(3.0, 0.0, 0.0));
        part.accumulate_transform(Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0)));
        part.replace_geometry(Solid::empty());
        assert_eq!(part.current_position(), Point3::new(4.0, 0.0, 0.0));
    }
}
